use crate::demo::{run_demo, run_score_preview, DemoArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use tender_desk::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Tender Desk",
    about = "Run the procurement bid evaluation service from the command line",
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
    /// Preview how a score triple classifies without persisting anything
    Score(ScoreArgs),
    /// Run an end-to-end demo covering intake, evaluation, and award
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
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score_preview(args),
        Command::Demo(args) => run_demo(args),
    }
}
