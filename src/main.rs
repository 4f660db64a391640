use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use url_beautifier::{
    Beautifier, BeautifierSettings, DetailsRequest, RouteKind, RouteRequest, SearchRequest,
};

/// Convert between faceted search state and readable URLs.
#[derive(Parser, Debug)]
#[command(name = "url-beautifier", version, about)]
struct Cli {
    /// JSON settings file (configuration plus optional "routes")
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a URL and print the request as JSON
    Parse {
        /// Relative or absolute URL
        url: String,
    },
    /// Build a URL from a JSON request
    Build {
        /// Route name: search, details or navigation
        route: String,
        /// Request as JSON; a JSON string for navigation
        request: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => BeautifierSettings::from_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => BeautifierSettings::default(),
    };
    let beautifier = Beautifier::from_settings(settings).context("invalid configuration")?;

    match cli.command {
        Command::Parse { url } => {
            let parsed = beautifier
                .parse(&url)
                .with_context(|| format!("parsing {}", url))?;
            println!("{}", serde_json::to_string_pretty(&parsed)?);
        }
        Command::Build { route, request } => {
            let request = read_request(&route, &request)?;
            println!("{}", beautifier.build(&route, &request)?);
        }
    }

    Ok(())
}

fn read_request(route: &str, json: &str) -> Result<RouteRequest> {
    let kind: RouteKind = route.parse()?;
    let request = match kind {
        RouteKind::Search => RouteRequest::Search(
            serde_json::from_str::<SearchRequest>(json).context("reading search request")?,
        ),
        RouteKind::Details => RouteRequest::Details(
            serde_json::from_str::<DetailsRequest>(json).context("reading details request")?,
        ),
        RouteKind::Navigation => RouteRequest::Navigation(
            serde_json::from_str::<String>(json).context("reading navigation name")?,
        ),
    };
    Ok(request)
}
