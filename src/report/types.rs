use std::fmt;

use clap::ValueEnum;

/// Bucket size of a stats breakdown report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Granularity {
    Hourly,
    Daily,
    Monthly,
}

impl Granularity {
    pub fn as_str(self) -> &'static str {
        match self {
            Granularity::Hourly => "hourly",
            Granularity::Daily => "daily",
            Granularity::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional report window; dates are passed to the API untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl DateRange {
    pub fn new(from: Option<String>, to: Option<String>) -> Self {
        Self { from, to }
    }

    /// Query pairs for the API, skipping unset or empty bounds.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(from) = self.from.as_deref().filter(|v| !v.is_empty()) {
            pairs.push(("date_from", from.to_string()));
        }
        if let Some(to) = self.to.as_deref().filter(|v| !v.is_empty()) {
            pairs.push(("date_to", to.to_string()));
        }
        pairs
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    StatsSummary {
        range: DateRange,
    },
    StatsBreakdown {
        range: DateRange,
        granularity: Granularity,
    },
    PopularFiles {
        range: DateRange,
        /// Zero renders every entry.
        top: usize,
    },
}

impl Default for Report {
    fn default() -> Self {
        Report::StatsSummary {
            range: DateRange::default(),
        }
    }
}

impl Report {
    /// Summary when no granularity is given, breakdown otherwise.
    pub fn stats(range: DateRange, granularity: Option<Granularity>) -> Self {
        match granularity {
            Some(granularity) => Report::StatsBreakdown { range, granularity },
            None => Report::StatsSummary { range },
        }
    }

    pub fn popular(range: DateRange, top: usize) -> Self {
        Report::PopularFiles { range, top }
    }

    /// Picks a report from its command name. Only `popular` selects the
    /// popular-files report; anything else runs stats.
    pub fn from_selector(
        selector: &str,
        range: DateRange,
        granularity: Option<Granularity>,
        top: usize,
    ) -> Self {
        match selector {
            "popular" => Report::popular(range, top),
            _ => Report::stats(range, granularity),
        }
    }

    pub fn range(&self) -> &DateRange {
        match self {
            Report::StatsSummary { range }
            | Report::StatsBreakdown { range, .. }
            | Report::PopularFiles { range, .. } => range,
        }
    }
}
