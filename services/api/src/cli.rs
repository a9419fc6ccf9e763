use crate::ops::{export_assessments, init_database, reset_database, show_submissions};
use crate::server;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use yakkai_wellness::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Yakkai Neri Wellness Intake",
    about = "Serve the wellness assessment and company registration forms, and inspect stored submissions",
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
    /// Manage the database schema
    Db {
        #[command(subcommand)]
        command: DbCommand,
    },
    /// Print submission counts and the most recent assessments
    Submissions(SubmissionsArgs),
    /// Export every assessment as CSV
    Export(ExportArgs),
}

#[derive(Subcommand, Debug)]
enum DbCommand {
    /// Create the tables if they do not exist
    Init(DatabaseArgs),
    /// Drop and recreate both tables, discarding all rows
    Reset(ResetArgs),
}

#[derive(Args, Debug, Default, Clone)]
pub(crate) struct DatabaseArgs {
    /// Override the configured SQLite database path
    #[arg(long)]
    pub(crate) database: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    #[command(flatten)]
    pub(crate) database: DatabaseArgs,
}

#[derive(Args, Debug)]
pub(crate) struct ResetArgs {
    /// Confirm that every stored submission and registration may be deleted
    #[arg(long)]
    pub(crate) yes: bool,
    #[command(flatten)]
    pub(crate) database: DatabaseArgs,
}

#[derive(Args, Debug)]
pub(crate) struct SubmissionsArgs {
    /// Number of recent assessments to list
    #[arg(long, default_value_t = 10)]
    pub(crate) limit: usize,
    #[command(flatten)]
    pub(crate) database: DatabaseArgs,
}

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    /// Destination file; prints to stdout when omitted
    #[arg(long, short)]
    pub(crate) output: Option<PathBuf>,
    #[command(flatten)]
    pub(crate) database: DatabaseArgs,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Db {
            command: DbCommand::Init(args),
        } => init_database(args),
        Command::Db {
            command: DbCommand::Reset(args),
        } => reset_database(args),
        Command::Submissions(args) => show_submissions(args),
        Command::Export(args) => export_assessments(args),
    }
}
