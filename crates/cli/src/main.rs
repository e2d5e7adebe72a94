//! Hifz Tracker CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! hifz-cli migrate
//!
//! # Create the first developer account (password generated and shown once)
//! hifz-cli user create -u developer1 -n "Site Developer" -r developer
//!
//! # Create a teacher with a chosen password
//! hifz-cli user create -u teacher1 -n "Ustadh Kareem" -r teacher -p 'a-long-password'
//!
//! # Seed demo data
//! hifz-cli seed --password 'demo-password-1'
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `user create` - Create users (the bootstrap path for the first developer)
//! - `seed` - Seed the database with demo data

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "hifz-cli")]
#[command(author, version, about = "Hifz Tracker CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Seed the database with demo data
    Seed {
        /// Password for every demo account
        #[arg(long)]
        password: String,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        /// Login identifier (lowercase, 3-32 chars)
        #[arg(short, long)]
        username: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Role (`developer`, `teacher`, `student`)
        #[arg(short, long)]
        role: String,

        /// Contact phone number
        #[arg(long)]
        phone: Option<String>,

        /// Password; generated and shown once when omitted
        #[arg(short, long)]
        password: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::User { action } => match action {
            UserAction::Create {
                username,
                name,
                role,
                phone,
                password,
            } => {
                commands::user::create_user(
                    &username,
                    &name,
                    &role,
                    phone.as_deref(),
                    password.as_deref(),
                )
                .await?;
            }
        },
        Commands::Seed { password } => commands::seed::run(&password).await?,
    }
    Ok(())
}
