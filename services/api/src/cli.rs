use crate::report::{run_catalog, run_report, ReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use property_valuation::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Property Valuation",
    about = "Serve the valuation form or produce valuation reports from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Value one property and write its PDF report
    Report(ReportArgs),
    /// List configured cities, areas, and pricing rules
    Catalog,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Report(args) => run_report(args),
        Command::Catalog => run_catalog(),
    }
}
