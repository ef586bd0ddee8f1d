mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use commands::route::{handle_route_command, RouteCommandArgs};
use evroute_cli::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about = "Battery-aware routing over road networks")]
struct Cli {
    /// Output format for results.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute an energy-feasible route between two nodes of a road network.
    Route(RouteCommandArgs),
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match &cli.command {
        Command::Route(args) => handle_route_command(args, cli.format),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn route_flags_parse() {
        let cli = Cli::try_parse_from([
            "evroute-cli",
            "--format",
            "json",
            "route",
            "--network",
            "net.json",
            "--from",
            "1",
            "--to",
            "4",
            "--algorithm",
            "a-star",
            "--metric",
            "octile",
            "--capacity",
            "6",
            "--trace",
        ])
        .expect("flags parse");
        assert_eq!(cli.format, OutputFormat::Json);
        let Command::Route(args) = cli.command;
        assert_eq!(args.from, 1);
        assert_eq!(args.capacity, 6.0);
        assert!(args.trace);
    }
}
