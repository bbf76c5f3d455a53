//! Terminal rendering of articles and sources.
//!
//! Colours are applied with `colored`, which drops them automatically when
//! stdout is not a terminal or `NO_COLOR` is set.

use crate::error::Error;
use crate::models::{Article, Source};
use colored::Colorize;
use std::fmt::Write;

pub const NO_ARTICLES: &str = "Failed to find any articles";
pub const NO_SOURCES: &str = "Failed to find any sources";

/// A blank line, then the title in yellow and the link in blue, per article.
pub fn render_articles(articles: &[Article]) -> String {
    let mut out = String::new();
    for article in articles {
        writeln!(out).unwrap();
        writeln!(out, "{}", article.title.yellow()).unwrap();
        writeln!(out, "{}", format!(">>> {}", article.url).blue()).unwrap();
    }
    out
}

/// Name, description and id per source, each block followed by a blank line.
pub fn render_sources(sources: &[Source]) -> String {
    let mut out = String::new();
    for source in sources {
        writeln!(out, "{}", source.name.green().bold()).unwrap();
        writeln!(out, "{}", source.description.yellow()).unwrap();
        writeln!(out, "{}", source.id.yellow()).unwrap();
        writeln!(out).unwrap();
    }
    out
}

pub fn render_empty(what: &str) -> String {
    what.red().to_string()
}

/// The one line a failed invocation prints to stderr.
pub fn render_error(error: &Error) -> String {
    error.to_string().red().to_string()
}
