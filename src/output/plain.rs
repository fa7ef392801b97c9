//! Plain text output formatting.
//!
//! Produces human-readable console output with colors.

use crate::scanner::title::extract_title;
use crate::scanner::{ProbeResult, StatusClass};
use console::style;

/// One console line describing a responding service.
///
/// Colored by status class. Redirects show the page title, read from the
/// body since the stored title holds the redirect label, then the target.
pub fn probe_line(result: &ProbeResult) -> String {
    let mut line = format!(
        "{} - {}",
        result.base_url.trim_end_matches('/'),
        result.status
    );

    match result.class() {
        StatusClass::Redirect => {
            if let Some(title) = extract_title(&result.body) {
                line.push_str(&format!(" - Title: {}", title));
            }
            let location = result.header("location").unwrap_or_default();
            format!("{} -> {}", style(line).blue(), location)
        }
        class => {
            if let Some(ref title) = result.title {
                line.push_str(&format!(" - Title: {}", title));
            }
            match class {
                StatusClass::Success => style(line).green().to_string(),
                StatusClass::Soft => style(line).yellow().to_string(),
                _ => line,
            }
        }
    }
}

/// Print a banner before probing begins.
pub fn print_run_header(hosts: usize, items: usize, threads: usize, timeout_secs: u64) {
    println!();
    println!(
        "{} {} v{}",
        style("Starting").cyan(),
        style("webmap").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(
        "{} Hosts: {}",
        style("•").dim(),
        style(hosts).white().bold()
    );
    println!(
        "{} Probing {} URLs with {} workers ({}s timeout)...",
        style("•").dim(),
        style(items).white().bold(),
        threads,
        timeout_secs
    );
    println!();
}

/// Print the closing statistics line.
pub fn print_summary(items: usize, found: usize, duration_ms: u64) {
    println!(
        "  {} {} URLs probed, {} responded in {:.2}s",
        style("Statistics:").bold(),
        items,
        style(found).green().bold(),
        duration_ms as f64 / 1000.0
    );
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}

/// Print a success message.
pub fn print_success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}
