mod cli;
mod infra;
mod ops;
mod routes;
mod server;

use yakkai_wellness::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
