//! Flight delays - a menu-driven explorer for a flight-delay database.

use flight_delays::app::App;
use flight_delays::charts::presenter_for;
use flight_delays::cli::Cli;
use flight_delays::config::{ChartRenderer, Config, DatabaseConfig};
use flight_delays::db;
use flight_delays::error::{FlightError, Result};
use flight_delays::logging;
use flight_delays::query::FlightQueries;
use tokio::io::BufReader;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse_args();

    if cli.log_stderr {
        logging::init_stderr_logging();
    } else {
        logging::init_file_logging();
    }

    if let Err(e) = run(cli).await {
        error!("{}: {}", e.category(), e);
        eprintln!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let mut config = Config::load_from_file(&config_path)?;

    let output = cli.parse_output_format().map_err(FlightError::config)?;
    if cli.text_charts {
        config.charts.renderer = ChartRenderer::Text;
    }

    let database = resolve_database(&cli, &config)?;
    info!("Database: {}", database.display_string());

    let client = db::connect(&database).await?;
    let queries = FlightQueries::new(client);
    let presenter = presenter_for(&config.charts);
    let mut app = App::new(queries, presenter, config.charts.clone(), output);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    let result = app.run(stdin, &mut stdout).await;

    app.shutdown().await?;
    result
}

/// Resolves the database to open from CLI args, config file, and environment.
fn resolve_database(cli: &Cli, config: &Config) -> Result<DatabaseConfig> {
    let named = match cli.database_name() {
        Some(name) => Some(config.get_database(Some(name)).cloned().ok_or_else(|| {
            FlightError::config(format!("Database '{}' not found in config file", name))
        })?),
        None => config.get_database(None).cloned(),
    };

    // A positional database overrides the path but keeps configured pool settings.
    let mut database = match (cli.to_database_config()?, named) {
        (Some(from_cli), Some(mut configured)) => {
            configured.merge(&from_cli);
            configured
        }
        (Some(from_cli), None) => from_cli,
        (None, Some(configured)) => configured,
        (None, None) => DatabaseConfig::default(),
    };

    // FLIGHTS_DB only applies when no path was given, then the built-in default.
    database.apply_env_defaults();

    Ok(database)
}
