use crate::demo::{run_dashboard, run_demo, run_list, DashboardArgs, DemoArgs, ListArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use scholar_track::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Scholarship Tracker",
    about = "Track scholarship applications and their deadlines from the command line",
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
    /// Render the dashboard summary for a CSV export
    Dashboard(DashboardArgs),
    /// List tracked applications from a CSV export
    List(ListArgs),
    /// Seed sample applications in memory and render the dashboard
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// CSV export used to seed the in-memory store (overrides APP_SEED_CSV)
    #[arg(long)]
    pub(crate) seed_csv: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Dashboard(args) => run_dashboard(args),
        Command::List(args) => run_list(args),
        Command::Demo(args) => run_demo(args),
    }
}
