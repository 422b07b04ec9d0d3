use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::config::{ConfigLayer, DEFAULT_CONFIG_PATH};
use crate::report::{DateRange, Granularity, Report};

use super::commands;

const NOTES: &str = "\
Notes:

    'alias', 'token' and/or 'secret' can be set via exporting them to
    your environment as ALIAS, TOKEN and/or SECRET.

    Additionally, they can be set in a YAML configuration via the
    config option. 'host' can also be set via configuration, but not
    environment.

    Precedence is argument > environment > configuration.

    Sample configuration:

    ---
    alias: YOUR_ALIAS
    token: YOUR_TOKEN
    secret: YOUR_SECRET";

/// Entry point for the `maxreport` command-line interface.
#[derive(Debug, Parser)]
#[command(
    name = "maxreport",
    about = "Run MaxCDN API Reports",
    version,
    long_about = None,
    after_help = NOTES
)]
pub struct Cli {
    /// YAML file containing all required args
    #[arg(short = 'c', long = "config", default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    /// [required] Consumer alias
    #[arg(short = 'a', long = "alias")]
    pub alias: Option<String>,

    /// [required] Consumer token
    #[arg(short = 't', long = "token")]
    pub token: Option<String>,

    /// [required] Consumer secret
    #[arg(short = 's', long = "secret")]
    pub secret: Option<String>,

    /// Override default API host
    #[arg(short = 'H', long = "host")]
    pub host: Option<String>,

    /// Display verbose HTTP transport information
    #[arg(long = "verbose")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Stats report
    ///
    /// Gets the total usage statistics for your account, optionally broken
    /// up by report type. Without a type the total usage is returned.
    Stats(StatsArgs),

    /// Popular files report
    ///
    /// Gets the most popularly requested files for your account.
    Popular(PopularArgs),
}

#[derive(Debug, Args)]
pub struct RangeArgs {
    /// Report start date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Report end date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,
}

#[derive(Debug, Args)]
pub struct StatsArgs {
    #[command(flatten)]
    pub range: RangeArgs,

    /// Report type
    #[arg(short = 't', long = "type", value_enum)]
    pub report_type: Option<Granularity>,
}

#[derive(Debug, Args)]
pub struct PopularArgs {
    #[command(flatten)]
    pub range: RangeArgs,

    /// Show top N results, zero or less shows all
    #[arg(short = 't', long = "top", default_value_t = 0, allow_negative_numbers = true)]
    pub top: i64,
}

impl RangeArgs {
    fn to_range(&self) -> DateRange {
        DateRange::new(self.from.clone(), self.to.clone())
    }
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Stats(_) => "stats",
            Command::Popular(_) => "popular",
        }
    }

    pub fn report(&self) -> Report {
        let (range, granularity, top) = match self {
            Command::Stats(args) => (args.range.to_range(), args.report_type, 0),
            Command::Popular(args) => (
                args.range.to_range(),
                None,
                usize::try_from(args.top).unwrap_or(0),
            ),
        };
        Report::from_selector(self.name(), range, granularity, top)
    }
}

impl Cli {
    /// The command-line layer of the configuration chain.
    pub fn layer(&self) -> ConfigLayer {
        ConfigLayer {
            host: self.host.clone(),
            alias: self.alias.clone(),
            token: self.token.clone(),
            secret: self.secret.clone(),
        }
    }

    pub fn report(&self) -> Option<Report> {
        self.command.as_ref().map(Command::report)
    }

    pub async fn run(self) -> Result<()> {
        commands::run(self).await
    }
}
