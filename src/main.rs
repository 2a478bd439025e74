//! ArCo Catalogue - command-line entry point
//!
//! Fetches the catalogue entries of one city and prints them as a JSON array.
//!
//! Usage:
//!   cargo run -- Roma --pretty
//!   cargo run -- Firenze --endpoint http://localhost:8890/sparql --timeout-secs 30

use arco_catalogue::{fetch_data, CityId, EndpointConfig, Error, SparqlClient};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "arco-catalogue")]
#[command(about = "Lists catalogued cultural properties of an Italian city from ArCo", long_about = None)]
struct Args {
    /// Local name of the ArCo city resource, e.g. Roma
    city: String,

    /// SPARQL endpoint URL (overrides the config file)
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Transport timeout in seconds (overrides the config file)
    #[arg(short, long)]
    timeout_secs: Option<u64>,

    /// JSON file with endpoint settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Print the rendered SPARQL query instead of running it
    #[arg(long)]
    print_query: bool,
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &Args) -> Result<EndpointConfig, Error> {
    let mut config = match &args.config {
        Some(path) => EndpointConfig::from_file(path)?,
        None => EndpointConfig::default(),
    };
    if let Some(endpoint) = &args.endpoint {
        config.endpoint_url = endpoint.clone();
    }
    if let Some(timeout_secs) = args.timeout_secs {
        config.timeout_secs = Some(timeout_secs);
    }
    config.validate()?;
    Ok(config)
}

async fn run(args: Args) -> Result<(), Error> {
    let city = CityId::parse(&args.city)?;

    if args.print_query {
        println!("{}", arco_catalogue::querying::render_query(&city));
        return Ok(());
    }

    let config = load_config(&args)?;
    info!(endpoint = %config.endpoint_url, city = %city.iri(), "querying ArCo");

    let client = SparqlClient::new(&config)?;
    let records = fetch_data(&client, &city).await?;
    info!(records = records.len(), "done");

    let json = if args.pretty {
        serde_json::to_string_pretty(&records)?
    } else {
        serde_json::to_string(&records)?
    };
    println!("{}", json);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::parse_from([
            "arco-catalogue",
            "Roma",
            "--endpoint",
            "http://localhost:8890/sparql",
            "--timeout-secs",
            "12",
        ]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.endpoint_url, "http://localhost:8890/sparql");
        assert_eq!(config.timeout_secs, Some(12));
    }

    #[test]
    fn test_defaults_without_flags() {
        let args = Args::parse_from(["arco-catalogue", "Roma"]);
        assert_eq!(load_config(&args).unwrap(), EndpointConfig::default());
        assert!(!args.pretty);
    }

    #[test]
    fn test_invalid_endpoint_flag_is_config_error() {
        let args = Args::parse_from(["arco-catalogue", "Roma", "--endpoint", "localhost"]);
        assert!(matches!(load_config(&args), Err(Error::Config(_))));
    }
}
