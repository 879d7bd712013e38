use crate::demo::{run_demo, run_eligibility, run_emi, DemoArgs, EligibilityArgs, EmiArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use loan_qualifier::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Loan Qualifier",
    about = "Score micro-business loan applications and price repayment plans",
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
    /// Compute the monthly instalment for a loan
    Emi(EmiArgs),
    /// Determine the loan ceiling and bank tier for a pair of scores
    Eligibility(EligibilityArgs),
    /// Walk a sample applicant through intake, scoring, eligibility and a quote
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
        Command::Emi(args) => run_emi(args),
        Command::Eligibility(args) => run_eligibility(args),
        Command::Demo(args) => run_demo(args),
    }
}
