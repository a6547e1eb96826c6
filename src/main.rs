mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use mc_core::config::Config;
use std::path::Path;

/// Load the config file (or defaults) and apply the `DB_URI` override.
fn load_config(path: Option<&Path>) -> Config {
    let mut config = Config::load_or_default(path);
    config.apply_env();
    config
}

async fn start_server(host: Option<String>, port: Option<u16>, config_path: Option<&Path>) -> Result<()> {
    let mut config = load_config(config_path);

    // Override host/port from CLI if specified
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    tracing::info!("Starting mission-control");
    tracing::info!(
        "Server will listen on {}:{}",
        config.server.host,
        config.server.port
    );

    mc_server::start(config).await?;
    Ok(())
}

fn open_pool(config_path: Option<&Path>) -> Result<mc_db::pool::DbPool> {
    let config = load_config(config_path);
    let location = config
        .database
        .location()
        .context("Invalid database url")?;
    tracing::info!("Opening database {:?}", location);
    Ok(mc_db::pool::init_pool(&location, config.database.pool_size)?)
}

fn migrate(config_path: Option<&Path>) -> Result<()> {
    // Opening the pool applies pending migrations.
    let pool = open_pool(config_path)?;
    let conn = mc_db::pool::get_conn(&pool)?;
    let version = mc_db::migrations::current_version(&conn)?;
    println!("Database schema at version {version}");
    Ok(())
}

fn seed(config_path: Option<&Path>, reset: bool) -> Result<()> {
    let pool = open_pool(config_path)?;
    let conn = mc_db::pool::get_conn(&pool)?;
    let summary = mc_db::seed::seed(&conn, reset)?;
    println!(
        "Seeded {} planets, {} scientists, {} missions",
        summary.planets, summary.scientists, summary.missions
    );
    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let mut config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let contents = std::fs::read_to_string(p)
                .with_context(|| format!("Failed to read {}", p.display()))?;
            Config::from_json(&contents)?
        }
        None => {
            println!("No config file specified, using defaults");
            Config::default()
        }
    };
    config.apply_env();

    let warnings = config.validate();
    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!("  Database: {}", config.database.url);
    println!("  Pool size: {}", config.database.pool_size);

    if warnings.is_empty() {
        println!("✓ Configuration is valid");
        Ok(())
    } else {
        for warning in &warnings {
            println!("  ! {warning}");
        }
        anyhow::bail!("{} configuration warning(s)", warnings.len())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "mission_control=trace,mc_server=trace,mc_db=debug,mc_core=debug,tower_http=debug"
                .to_string()
        } else {
            "mission_control=debug,mc_server=debug,mc_db=info,mc_core=info,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt().with_env_filter(&env_filter).init();

    match cli.command {
        Commands::Start { host, port } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(host, port, cli.config.as_deref()))
        }
        Commands::Migrate => migrate(cli.config.as_deref()),
        Commands::Seed { reset } => seed(cli.config.as_deref(), reset),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("mission-control {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
