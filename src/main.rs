use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use thread_store::config::DatabaseConfig;
use thread_store::database::migrate::{self, MigrateDirection, SchemaBackend};
use thread_store::database::{establish_connection, get_database_url};

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    /// trace, debug, info, warn or error (default: info)
    #[clap(short, long, global = true)]
    log_level: Option<String>,
    /// TOML file with a [database] table
    #[clap(short, long, global = true)]
    config: Option<String>,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Db {
        #[clap(subcommand)]
        command: DbCommands,
    },
}

#[derive(Subcommand, Debug)]
enum DbCommands {
    /// Create the thread tables in a new database
    Init {
        #[clap(short, long)]
        database: Option<String>,
    },
    /// Run migrations in the given direction
    Migrate {
        #[clap(subcommand)]
        direction: MigrateDirection,
        #[clap(short, long)]
        database: Option<String>,
    },
    /// List known migrations and whether they are applied
    Status {
        #[clap(short, long)]
        database: Option<String>,
    },
    /// Print the DDL issued by the migration
    Schema {
        #[clap(short, long, value_enum, default_value = "sqlite")]
        backend: SchemaBackend,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    setup_logging(&args.log_level);

    let config = match &args.config {
        Some(path) => DatabaseConfig::load(path)?,
        None => DatabaseConfig::default(),
    };

    match args.command {
        Commands::Db { command } => match command {
            DbCommands::Init { database } => {
                let config = resolve_config(config, database.as_deref());
                info!("Initializing database: {}", config.url);
                migrate::migrate_database(&config, MigrateDirection::Up).await?;
            }
            DbCommands::Migrate {
                direction,
                database,
            } => {
                let config = resolve_config(config, database.as_deref());
                info!("Running database migration: {:?}", direction);
                migrate::migrate_database(&config, direction).await?;
            }
            DbCommands::Status { database } => {
                let config = resolve_config(config, database.as_deref());
                let db = establish_connection(&config).await?;
                for migration in migrate::migration_status(&db).await? {
                    let state = if migration.applied { "Applied" } else { "Pending" };
                    println!("{:<8} {}", state, migration.name);
                }
            }
            DbCommands::Schema { backend } => {
                for statement in migrate::schema_sql(backend) {
                    println!("{};", statement);
                }
            }
        },
    }

    Ok(())
}

fn resolve_config(config: DatabaseConfig, database: Option<&str>) -> DatabaseConfig {
    match database {
        Some(path) => config.with_url(get_database_url(Some(path))),
        None => config,
    }
}

fn setup_logging(log_level: &Option<String>) {
    let log_level = match log_level
        .as_ref()
        .unwrap_or(&"info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level.to_string()))
        .without_time()
        .init();
}
