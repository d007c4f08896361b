use colored::Colorize;

use crate::error::PagebuilderError;
use crate::photos::SearchResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Pretty,
    Json,
}

impl OutputMode {
    pub fn from_flag(json: bool) -> Self {
        if json {
            OutputMode::Json
        } else {
            OutputMode::Pretty
        }
    }
}

/// Render search hits as one block per photo, or as the raw result JSON.
pub fn format_search_result(result: &SearchResult, mode: OutputMode, is_tty: bool) -> String {
    if mode == OutputMode::Json {
        return serde_json::to_string_pretty(result).unwrap_or_default();
    }

    let mut out = String::new();
    for photo in &result.results {
        let alt = photo.alt_description.as_deref().unwrap_or("(no description)");
        if is_tty {
            out.push_str(&format!("{}  {}\n", photo.id.bold(), alt));
            out.push_str(&format!("    {}\n", photo.urls.regular.underline()));
        } else {
            out.push_str(&format!("{}  {}\n    {}\n", photo.id, alt, photo.urls.regular));
        }
    }
    let summary = format!("{} of {} results", result.results.len(), result.total);
    if is_tty {
        out.push_str(&summary.dimmed().to_string());
    } else {
        out.push_str(&summary);
    }
    out
}

pub fn print_search_result(result: &SearchResult, mode: OutputMode, is_tty: bool) {
    println!("{}", format_search_result(result, mode, is_tty));
}

pub fn print_json(value: &serde_json::Value) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

pub fn print_error(err: &PagebuilderError, json_mode: bool) {
    if json_mode {
        print_json(&err.to_json());
    } else {
        eprintln!("Error: {err}");
    }
}
