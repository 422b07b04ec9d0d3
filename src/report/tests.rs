use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde_json::json;

use crate::client::{Endpoint, ReportApi};

use super::{DateRange, Granularity, Report, run_report};

type Call = (Endpoint, Vec<(&'static str, String)>);

struct FakeApi {
    payload: Result<String, String>,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl FakeApi {
    fn returning(payload: serde_json::Value) -> Self {
        Self {
            payload: Ok(payload.to_string()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            payload: Err(message.to_string()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReportApi for FakeApi {
    async fn get(&self, endpoint: Endpoint, query: &[(&'static str, String)]) -> Result<String> {
        self.calls.lock().unwrap().push((endpoint, query.to_vec()));
        self.payload.clone().map_err(|message| anyhow!(message))
    }
}

fn summary_payload() -> serde_json::Value {
    json!({
        "code": 200,
        "data": {"stats": {"hit": "30", "cache_hit": "20", "noncache_hit": "10", "size": "4096"}}
    })
}

fn breakdown_payload() -> serde_json::Value {
    json!({
        "code": 200,
        "data": {
            "stats": [
                {"timestamp": "2024-03-03", "hit": "3", "cache_hit": "3", "noncache_hit": "0", "size": "30"},
                {"timestamp": "2024-03-01", "hit": "1", "cache_hit": "0", "noncache_hit": "1", "size": "10"},
                {"timestamp": "2024-03-02", "hit": "2", "cache_hit": "1", "noncache_hit": "1", "size": "20"}
            ]
        }
    })
}

fn popular_payload(count: usize) -> serde_json::Value {
    let files: Vec<_> = (0..count)
        .map(|i| json!({"hit": (1000 - i).to_string(), "uri": format!("/assets/{i}.png")}))
        .collect();
    json!({"code": 200, "data": {"popularfiles": files}})
}

async fn run(report: &Report, api: &FakeApi) -> Result<String> {
    let mut out = Vec::new();
    run_report(report, api, &mut out).await?;
    Ok(String::from_utf8(out).unwrap())
}

fn rows(output: &str) -> Vec<&str> {
    output
        .lines()
        .skip(4)
        .filter(|line| !line.is_empty())
        .collect()
}

#[tokio::test]
async fn default_report_runs_stats_summary() {
    let api = FakeApi::returning(summary_payload());
    let output = run(&Report::default(), &api).await.unwrap();

    assert_eq!(api.calls()[0].0, Endpoint::StatsSummary);
    assert!(output.starts_with("Running summary stats report."));
    assert_eq!(rows(&output).len(), 1);
}

#[tokio::test]
async fn unrecognized_selector_falls_back_to_stats() {
    for selector in ["", "stats", "bandwidth", "Popular"] {
        let report = Report::from_selector(selector, DateRange::default(), None, 5);
        assert!(
            !matches!(report, Report::PopularFiles { .. }),
            "selector {selector:?} chose popular"
        );

        let api = FakeApi::returning(summary_payload());
        run(&report, &api).await.unwrap();
        assert_eq!(api.calls()[0].0, Endpoint::StatsSummary);
    }

    let report = Report::from_selector("popular", DateRange::default(), None, 5);
    assert_eq!(report, Report::popular(DateRange::default(), 5));
}

#[tokio::test]
async fn breakdown_renders_each_bucket_in_input_order() {
    let report = Report::stats(DateRange::default(), Some(Granularity::Daily));
    let api = FakeApi::returning(breakdown_payload());
    let output = run(&report, &api).await.unwrap();

    assert_eq!(
        api.calls()[0].0,
        Endpoint::StatsBreakdown(Granularity::Daily)
    );
    assert!(output.starts_with("Running daily stats report."));

    let timestamps: Vec<&str> = rows(&output)
        .iter()
        .map(|row| row.split('|').next().unwrap().trim())
        .collect();
    assert_eq!(timestamps, vec!["2024-03-03", "2024-03-01", "2024-03-02"]);
}

#[tokio::test]
async fn summary_without_granularity_renders_one_row() {
    let report = Report::stats(DateRange::default(), None);
    let api = FakeApi::returning(summary_payload());
    let output = run(&report, &api).await.unwrap();

    let rows = rows(&output);
    assert_eq!(rows.len(), 1);
    assert!(rows[0].ends_with("4096"));
}

#[tokio::test]
async fn popular_files_respect_top_limit() {
    let api = FakeApi::returning(popular_payload(12));
    let output = run(&Report::popular(DateRange::default(), 4), &api)
        .await
        .unwrap();
    assert_eq!(api.calls()[0].0, Endpoint::PopularFiles);
    assert_eq!(rows(&output).len(), 4);

    let api = FakeApi::returning(popular_payload(12));
    let output = run(&Report::popular(DateRange::default(), 0), &api)
        .await
        .unwrap();
    assert_eq!(rows(&output).len(), 12);
}

#[tokio::test]
async fn date_range_is_forwarded_verbatim() {
    let range = DateRange::new(Some("2024-03-01".into()), Some("not-a-date".into()));
    let api = FakeApi::returning(popular_payload(1));
    run(&Report::popular(range, 0), &api).await.unwrap();

    assert_eq!(
        api.calls()[0].1,
        vec![
            ("date_from", "2024-03-01".to_string()),
            ("date_to", "not-a-date".to_string()),
        ]
    );
}

#[tokio::test]
async fn empty_range_sends_no_query() {
    let range = DateRange::new(None, Some(String::new()));
    let api = FakeApi::returning(summary_payload());
    run(&Report::stats(range, None), &api).await.unwrap();

    assert!(api.calls()[0].1.is_empty());
}

#[tokio::test]
async fn each_report_issues_exactly_one_request() {
    for report in [
        Report::default(),
        Report::stats(DateRange::default(), Some(Granularity::Hourly)),
        Report::popular(DateRange::default(), 0),
    ] {
        let payload = if matches!(report, Report::PopularFiles { .. }) {
            popular_payload(2)
        } else if matches!(report, Report::StatsBreakdown { .. }) {
            breakdown_payload()
        } else {
            summary_payload()
        };
        let api = FakeApi::returning(payload);
        run(&report, &api).await.unwrap();
        assert_eq!(api.calls().len(), 1);
    }
}

#[tokio::test]
async fn api_failure_produces_no_output() {
    let api = FakeApi::failing("connection refused");
    let mut out = Vec::new();
    let err = run_report(&Report::default(), &api, &mut out)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("connection refused"));
    assert!(out.is_empty());
}

#[tokio::test]
async fn undecodable_payload_produces_no_output() {
    let api = FakeApi::returning(json!({"code": 500, "error": {"message": "boom"}}));
    let mut out = Vec::new();
    let err = run_report(&Report::popular(DateRange::default(), 0), &api, &mut out)
        .await
        .unwrap_err();

    assert!(format!("{err:#}").contains("boom"));
    assert!(out.is_empty());
}
