use std::io::{self, Write};

use anyhow::Result;
use clap::CommandFactory;
use colored::Colorize;
use tracing::debug;

use crate::client::{MaxCdnClient, ReportApi};
use crate::config::Config;
use crate::logging;
use crate::report::run_report;

use super::args::Cli;

pub(crate) async fn run(cli: Cli) -> Result<()> {
    logging::init(cli.verbose);

    let Some(report) = cli.report() else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = Config::load(&cli.layer(), &cli.config)?
        .with_verbose(cli.verbose)
        .with_report(report)
        .build();
    debug!(host = %config.api_base_url(), report = ?config.report, "configuration resolved");

    let client = MaxCdnClient::new(&config)?;
    let mut stdout = io::stdout();
    execute(&config, &client, &mut stdout).await
}

/// Warns about missing credentials, then runs the report regardless; the
/// API call is what ultimately fails for an incomplete configuration.
pub(crate) async fn execute(
    config: &Config,
    api: &dyn ReportApi,
    out: &mut dyn Write,
) -> Result<()> {
    report_argument_errors(config, out)?;
    run_report(&config.report, api, out).await
}

/// Prints validation problems followed by the usage text. Returns whether
/// anything was printed.
pub(crate) fn report_argument_errors(config: &Config, out: &mut dyn Write) -> Result<bool> {
    let problems = config.validate();
    if problems.is_empty() {
        return Ok(false);
    }

    writeln!(out, "{}\n{problems}", "argument error:".red().bold())?;
    writeln!(out, "{}", Cli::command().render_help())?;
    Ok(true)
}
