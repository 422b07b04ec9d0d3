use std::io::{self, Write};

use super::mappers::{PopularFile, StatsRecord, SummaryStats};
use super::types::Granularity;

const SUMMARY_RULE: &str =
    "--------------------------------------------------------------------------------";
const BREAKDOWN_RULE: &str =
    " -------------------------------------------------------------------------------";
const POPULAR_RULE: &str = "   -----------------";

pub fn render_summary(out: &mut dyn Write, stats: &SummaryStats) -> io::Result<()> {
    writeln!(out, "Running summary stats report.\n")?;
    writeln!(
        out,
        "{:>15} | {:>15} | {:>15} | {:>15}",
        "total hits", "cache hits", "non-cache hits", "size"
    )?;
    writeln!(out, "{SUMMARY_RULE}")?;
    writeln!(
        out,
        "{:>15} | {:>15} | {:>15} | {:>15}",
        stats.hit, stats.cache_hit, stats.noncache_hit, stats.size
    )?;
    writeln!(out)
}

/// One row per bucket, in the order the API returned them.
pub fn render_breakdown(
    out: &mut dyn Write,
    granularity: Granularity,
    records: &[StatsRecord],
) -> io::Result<()> {
    writeln!(out, "Running {granularity} stats report.\n")?;
    writeln!(
        out,
        "{:>25} | {:>10} | {:>10} | {:>10} | {:>10}",
        "timestamp", "total", "cached", "non-cached", "size"
    )?;
    writeln!(out, "{BREAKDOWN_RULE}")?;
    for record in records {
        writeln!(
            out,
            "{:>25} | {:>10} | {:>10} | {:>10} | {:>10}",
            record.timestamp, record.hit, record.cache_hit, record.noncache_hit, record.size
        )?;
    }
    writeln!(out)
}

/// Renders the first `top` files, or all of them when `top` is zero.
pub fn render_popular(out: &mut dyn Write, files: &[PopularFile], top: usize) -> io::Result<()> {
    writeln!(out, "Running popular files report.\n")?;
    writeln!(out, "{:>10} | {}", "hits", "file")?;
    writeln!(out, "{POPULAR_RULE}")?;

    let limit = if top == 0 { files.len() } else { top };
    for file in files.iter().take(limit) {
        writeln!(out, "{:>10} | {}", file.hit, file.uri)?;
    }
    writeln!(out)
}
