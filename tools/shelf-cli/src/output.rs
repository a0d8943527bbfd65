//! Output formatting for the CLI.

use std::fmt;
#[cfg(test)]
use std::sync::{Arc, Mutex};

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use shelf_commerce::catalog::Product;
use shelf_commerce::checkout::OrderStatus;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
    #[cfg(test)]
    captured: Option<Arc<Mutex<String>>>,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self {
            verbose,
            json,
            #[cfg(test)]
            captured: None,
        }
    }

    /// Output handler whose stdout lines are collected into a buffer.
    #[cfg(test)]
    pub fn capturing(json: bool) -> (Self, Arc<Mutex<String>>) {
        let buffer = Arc::new(Mutex::new(String::new()));
        let output = Self {
            captured: Some(Arc::clone(&buffer)),
            ..Self::new(false, json)
        };
        (output, buffer)
    }

    fn stdout(&self, line: impl fmt::Display) {
        #[cfg(test)]
        if let Some(buffer) = &self.captured {
            let mut buffer = buffer.lock().unwrap();
            buffer.push_str(&line.to_string());
            buffer.push('\n');
            return;
        }
        println!("{line}");
    }

    /// Human-readable line on stdout; suppressed in JSON mode.
    fn say(&self, line: impl fmt::Display) {
        if !self.json {
            self.stdout(line);
        }
    }

    /// Human-readable line on stderr; suppressed in JSON mode.
    fn say_err(&self, line: impl fmt::Display) {
        if !self.json {
            eprintln!("{line}");
        }
    }

    pub fn info(&self, msg: &str) {
        self.say(format_args!("{} {}", style("ℹ").blue(), msg));
    }

    pub fn success(&self, msg: &str) {
        self.say(format_args!("{} {}", style("✓").green(), msg));
    }

    pub fn warn(&self, msg: &str) {
        self.say_err(format_args!("{} {}", style("⚠").yellow(), msg));
    }

    /// Print an error; a JSON object on stderr in JSON mode.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        } else {
            eprintln!("{} {}", style("✗").red(), style(msg).red());
        }
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if self.verbose {
            self.say_err(format_args!("{} {}", style("→").dim(), style(msg).dim()));
        }
    }

    pub fn header(&self, msg: &str) {
        self.say(format_args!("\n{}", style(msg).bold().underlined()));
    }

    /// Print a numbered step of a multi-step command.
    pub fn step(&self, num: usize, total: usize, msg: &str) {
        self.say(format_args!("{} {}", style(format!("[{num}/{total}]")).dim(), msg));
    }

    /// Print a value as pretty JSON.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            self.stdout(json);
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        self.say(format_args!("  {}: {}", style(key).dim(), value));
    }

    pub fn list_item(&self, item: &str) {
        self.say(format_args!("  {} {}", style("•").dim(), item));
    }

    /// Print one row of a fixed-width table.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        self.say(format_args!("  {}", format_row(cols, widths)));
    }

    /// Spinner for a network round trip; hidden in JSON mode.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) =
            ProgressStyle::default_spinner().template("{spinner:.green} {msg}")
        {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    pub fn is_json(&self) -> bool {
        self.json
    }
}

fn format_row(cols: &[&str], widths: &[usize]) -> String {
    let formatted: Vec<String> = cols
        .iter()
        .zip(widths.iter())
        .map(|(col, width)| format!("{:width$}", truncate(col, *width), width = *width))
        .collect();
    formatted.join("  ").trim_end().to_string()
}

/// Shorten `text` to at most `width` characters, marking the cut with `…`.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{kept}…")
}

/// Status badge for order states.
pub fn status_badge(status: OrderStatus) -> String {
    let label = status.display_name();
    match status {
        OrderStatus::Pending => style(label).yellow().to_string(),
        OrderStatus::Completed => style(label).green().to_string(),
        OrderStatus::Cancelled => style(label).red().to_string(),
    }
}

/// Star rating such as `★★★★☆ 4.5 (120)`.
pub fn format_rating(product: &Product) -> String {
    let filled = product.rating.round().clamp(0.0, 5.0) as usize;
    format!(
        "{}{} {:.1} ({})",
        "★".repeat(filled),
        "☆".repeat(5 - filled),
        product.rating,
        product.review_count
    )
}
