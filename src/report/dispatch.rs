use std::io::Write;

use anyhow::{Context, Result};
use tracing::info;

use crate::client::{Endpoint, ReportApi};

use super::mappers::{parse_breakdown, parse_popular, parse_summary};
use super::render::{render_breakdown, render_popular, render_summary};
use super::types::Report;

/// Runs the selected report: one request, one decoded payload, one table.
pub async fn run_report(report: &Report, api: &dyn ReportApi, out: &mut dyn Write) -> Result<()> {
    let query = report.range().query();

    match report {
        Report::StatsSummary { .. } => {
            info!("running summary stats report");
            let raw = api.get(Endpoint::StatsSummary, &query).await?;
            let stats = parse_summary(&raw).context("Failed to decode summary stats")?;
            render_summary(out, &stats)?;
        }
        Report::StatsBreakdown { granularity, .. } => {
            info!(%granularity, "running stats breakdown report");
            let raw = api.get(Endpoint::StatsBreakdown(*granularity), &query).await?;
            let stats = parse_breakdown(&raw).context("Failed to decode stats breakdown")?;
            render_breakdown(out, *granularity, &stats.stats)?;
        }
        Report::PopularFiles { top, .. } => {
            info!(top, "running popular files report");
            let raw = api.get(Endpoint::PopularFiles, &query).await?;
            let files = parse_popular(&raw).context("Failed to decode popular files")?;
            render_popular(out, &files.popularfiles, *top)?;
        }
    }

    out.flush().context("Failed to flush report output")?;
    Ok(())
}
