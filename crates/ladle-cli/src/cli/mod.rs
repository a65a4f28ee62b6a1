//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use ladle_core::config::Config;

mod commands;

#[derive(Parser)]
#[command(name = "ladle")]
#[command(version)]
#[command(about = "Browse and manage a remote recipe catalog")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log in with an API token
    Login {
        /// Bearer token issued by the recipe API
        #[arg(value_name = "TOKEN")]
        token: String,
    },

    /// Log out (clear the stored token)
    Logout,

    /// Show the current user's profile
    Whoami,

    /// Browse the recipe catalog
    Recipes {
        /// Page of the catalog to show (ignored when searching)
        #[arg(long, default_value_t = 0)]
        page: u32,

        /// Search recipes by name or ingredient
        #[arg(long, value_name = "QUERY")]
        search: Option<String>,
    },

    /// Create a recipe (professional accounts only)
    Create(Box<commands::create::CreateArgs>),

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Login { token } => {
            let config = Config::load().context("load config")?;
            commands::auth::login(&config, &token).await
        }
        Commands::Logout => commands::auth::logout(),
        Commands::Whoami => {
            let config = Config::load().context("load config")?;
            commands::auth::whoami(&config).await
        }
        Commands::Recipes { page, search } => {
            let config = Config::load().context("load config")?;
            commands::recipes::run(&config, page, search).await
        }
        Commands::Create(args) => {
            let config = Config::load().context("load config")?;
            commands::create::run(&config, *args).await
        }
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                println!("{}", ladle_core::config::paths::config_path().display());
                Ok(())
            }
            ConfigCommands::Init => {
                let path = ladle_core::config::paths::config_path();
                if Config::init()? {
                    println!("Wrote {}", path.display());
                } else {
                    println!("Config already exists at {}", path.display());
                }
                Ok(())
            }
        },
    }
}
