//! # simple_cli_news
//!
//! Read headlines and search articles from [newsapi.org](https://newsapi.org)
//! in the terminal.
//!
//! ## Usage
//!
//! ```sh
//! simple_cli_news -a <apikey>          # store the apikey
//! simple_cli_news                      # top headlines
//! simple_cli_news -q rust -p 5         # search the last 10 days
//! simple_cli_news list sources -c us   # list sources
//! ```
//!
//! ## Flow
//!
//! 1. **Config**: load `config.json` (defaults if it's missing), or update it and exit
//! 2. **Request**: pick `everything` or `top-headlines` and build the URL
//! 3. **Send**: one GET, classified into a payload or an [`error::Error`]
//! 4. **Render**: coloured output on stdout, errors on stderr
//!
//! ## Exit codes
//!
//! - `0`: results shown, or config updated
//! - `1`: the request worked but nothing was found
//! - `2`: the request or the config update failed

use chrono::Utc;
use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod config;
mod error;
mod models;
mod output;
mod request;

use api::NewsClient;
use cli::{Cli, Command, ListCommand};
use config::NewsConfig;
use error::Error;
use models::{News, Sources};
use request::{DEFAULT_PAGE_SIZE, Endpoint, NewsRequest, SourcesRequest};

/// How an invocation ended, before it becomes an exit code.
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    ConfigUpdated,
    Shown(usize),
    NothingFound,
}

impl Outcome {
    fn exit_code(&self) -> ExitCode {
        match self {
            Outcome::ConfigUpdated | Outcome::Shown(_) => ExitCode::SUCCESS,
            Outcome::NothingFound => ExitCode::from(1),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // --- Tracing init ---
    // stdout is for articles; logs go to stderr and stay quiet unless RUST_LOG says otherwise.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let args = Cli::parse();
    debug!(?args.query, ?args.source, ?args.page_size, ?args.config, "Parsed CLI arguments");

    match run(args).await {
        Ok(outcome) => {
            info!(?outcome, "Done");
            outcome.exit_code()
        }
        Err(e) => {
            debug!(kind = e.kind(), error = %e, "Invocation failed");
            eprintln!("{}", output::render_error(&e));
            ExitCode::from(2)
        }
    }
}

async fn run(args: Cli) -> Result<Outcome, Error> {
    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => config::default_config_path()?,
    };
    let config = config::load(&config_path);

    if let Some(outcome) = update_config(&args, &config, &config_path)? {
        return Ok(outcome);
    }

    if config.apikey.is_empty() {
        warn!("No apikey configured; newsapi.org will reject the request");
    }

    let client = NewsClient::new(Duration::from_secs(args.timeout))?;

    match &args.command {
        Some(Command::List {
            what: ListCommand::Sources { country },
        }) => {
            let request = SourcesRequest::new(config.apikey.clone(), country.clone());
            let sources = client.send(&request).await?;
            Ok(show_sources(&sources))
        }
        None => {
            let request = news_request(&args, &config);
            let news = client.send(&request).await?;
            Ok(show_articles(&news))
        }
    }
}

/// Apply `-a` or `-l` to the stored config. `-a` wins if both are given.
///
/// Returns `None` when neither flag is set and the invocation should go on to
/// query the API.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
fn update_config(
    args: &Cli,
    config: &NewsConfig,
    path: &Path,
) -> Result<Option<Outcome>, Error> {
    let updated = if let Some(apikey) = &args.apikey {
        config.clone().with_apikey(apikey.clone())
    } else if let Some(language) = &args.language {
        config.clone().with_language(language.clone())
    } else {
        return Ok(None);
    };

    config::save(&updated, path)?;
    info!(language = %updated.language, "Config updated");
    Ok(Some(Outcome::ConfigUpdated))
}

fn news_request(args: &Cli, config: &NewsConfig) -> NewsRequest {
    let endpoint = Endpoint::for_search(args.query.as_deref(), args.source.as_deref(), Utc::now());

    let request = NewsRequest::new(endpoint, config.apikey.clone(), config.language.clone())
        .query(args.query.clone())
        .sources(args.source.clone())
        .page_size(args.page_size.unwrap_or(DEFAULT_PAGE_SIZE));
    debug!(endpoint = request.endpoint().path(), "Selected endpoint");
    request
}

fn show_articles(news: &News) -> Outcome {
    if news.articles.is_empty() {
        println!("{}", output::render_empty(output::NO_ARTICLES));
        return Outcome::NothingFound;
    }
    debug!(total_results = ?news.total_results, shown = news.articles.len(), "Rendering articles");
    print!("{}", output::render_articles(&news.articles));
    Outcome::Shown(news.articles.len())
}

fn show_sources(sources: &Sources) -> Outcome {
    if sources.sources.is_empty() {
        println!("{}", output::render_empty(output::NO_SOURCES));
        return Outcome::NothingFound;
    }
    print!("{}", output::render_sources(&sources.sources));
    Outcome::Shown(sources.sources.len())
}
