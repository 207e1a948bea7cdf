//! CLI output formatting utilities.

use crate::apod::ApodRecord;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print an APOD entry.
    pub fn apod_record(record: &ApodRecord) {
        println!("\n{} ({})", style(&record.title).bold(), style(&record.date).cyan());
        if let Some(copyright) = &record.copyright {
            Output::kv("Copyright", copyright.trim());
        }
        match &record.url {
            Some(url) => Output::kv("Media", url),
            None => Output::kv("Media", "not available (see apod.nasa.gov)"),
        }
        if let Some(hd) = &record.hdurl {
            Output::kv("HD", hd);
        }
        if let Some(thumb) = &record.thumbnail_url {
            Output::kv("Thumbnail", thumb);
        }
        println!("\n{}\n", record.explanation);
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

/// Shorten a string for one-line display.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
