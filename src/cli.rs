//! Command-line interface definitions for simple_cli_news.
//!
//! Running with no flags lists today's top headlines. `-q`/`-s` switch to a
//! full-text search over the last ten days. `-a` and `-l` only update the
//! stored config and exit.

use crate::api::DEFAULT_TIMEOUT;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Store an apikey from newsapi.org
/// simple_cli_news -a 0123456789abcdef
///
/// # Top headlines
/// simple_cli_news
///
/// # Search, 5 results
/// simple_cli_news -q "rust language" -p 5
///
/// # List the sources available in the US
/// simple_cli_news list sources -c us
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about, disable_version_flag = true)]
pub struct Cli {
    /// Update the config with an api key from NewsApi
    #[arg(short = 'a', long = "apikey", visible_alias = "key")]
    pub apikey: Option<String>,

    /// Search news from the past 10 days
    #[arg(short, long, visible_alias = "search")]
    pub query: Option<String>,

    /// Get news from a certain source with its ID
    #[arg(short, long)]
    pub source: Option<String>,

    /// Set how many articles should be displayed
    #[arg(
        short,
        long,
        visible_aliases = ["pagesize", "pgsize", "pg-size", "page_size"],
        value_parser = clap::value_parser!(u32).range(1..=100)
    )]
    pub page_size: Option<u32>,

    /// Set the default language
    #[arg(
        short,
        long,
        visible_alias = "lang",
        value_parser = clap::builder::NonEmptyStringValueParser::new()
    )]
    pub language: Option<String>,

    /// Path to config.json (defaults to the platform config directory)
    #[arg(short, long, env = "SIMPLE_CLI_NEWS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout: u64,

    /// Prints version information and then exits
    #[arg(short = 'v', long, action = ArgAction::Version)]
    #[allow(dead_code)]
    version: Option<bool>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List possible args for various commands
    List {
        #[command(subcommand)]
        what: ListCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum ListCommand {
    /// List possible sources
    Sources {
        /// List sources from a country using its 2-letter ISO code
        #[arg(short, long, visible_alias = "location")]
        country: Option<String>,
    },
}
