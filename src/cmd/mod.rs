use std::sync::Arc;

use crate::{conf::Settings, pkg::server::listen, prelude::Result};
use clap::{Parser, Subcommand};

mod admin;
pub mod migrate;
mod replay;

#[derive(Parser)]
#[command(about = "accepts website form submissions and fans them out")]
struct Cmd {
    #[command(subcommand)]
    command: Option<SubCommandType>,
}

#[derive(Subcommand)]
enum SubCommandType {
    /// serve the http api
    Listen,
    /// apply pending database migrations
    Migrate,
    /// create an administrator and print a bearer token for it
    CreateAdmin {
        #[arg(long)]
        name: String,
    },
    /// retry spreadsheet appends that failed during registration
    ReplaySheet,
}

pub async fn run() -> Result<()> {
    let args = Cmd::parse();
    let settings = Arc::new(Settings::new()?);
    match args.command {
        Some(SubCommandType::Listen) => {
            listen(settings).await?;
        }
        Some(SubCommandType::Migrate) => {
            migrate::apply(&settings).await?;
        }
        Some(SubCommandType::CreateAdmin { name }) => {
            admin::create(settings, &name).await?;
        }
        Some(SubCommandType::ReplaySheet) => {
            replay::run(settings).await?;
        }
        None => {
            tracing::error!("no subcommand passed");
        }
    }
    Ok(())
}
