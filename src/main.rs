mod cli;
mod model;
mod server;

use clap::Parser;

use crate::server::{error::AppError, startup};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    cli::run(cli::Cli::parse()).await
}
