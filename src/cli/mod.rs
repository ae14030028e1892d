pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::database::Database;

#[derive(Parser)]
#[command(name = "school-admin")]
#[command(about = "Administrative tasks for the school API database")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Apply pending database migrations")]
    Migrate,

    #[command(about = "Create a superadmin account, or promote an existing one")]
    CreateSuperadmin {
        #[arg(long, help = "Account email")]
        email: String,

        #[arg(long, help = "Display name")]
        name: String,

        #[arg(long, help = "Password; required when the account does not exist yet")]
        password: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    let config = AppConfig::from_env();
    config.validate()?;
    let db = Database::connect_lazy(&config.database)?;

    match cli.command {
        Commands::Migrate => commands::migrate::handle(&db, output_format).await,
        Commands::CreateSuperadmin { email, name, password } => {
            let request = commands::superadmin::SuperadminRequest { email, name, password };
            commands::superadmin::handle(&db, &config, request, output_format).await
        }
    }
}
