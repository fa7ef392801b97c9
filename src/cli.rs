//! Command-line interface for webmap.
//!
//! Uses `clap` derive macros for declarative argument parsing and drives a
//! complete run: read targets, probe, report.

use crate::config::AppSettings;
use crate::error::{CliError, CliResult, ConfigError};
use crate::output;
use crate::report::build_rows;
use crate::scanner::{generate_work, run_map, HttpProber, MapJobConfig, ProbeConfig};
use crate::types::{load_hosts, PortCatalog, PortList};
use clap::Parser;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Map the web services exposed by a list of hosts and ranges.
///
/// Every host is probed over HTTP and HTTPS on a catalog of common web
/// ports. Responding services are summarised in a table sorted by status
/// code and saved next to the input file.
#[derive(Parser, Debug)]
#[command(name = "webmap")]
#[command(author = "HueCodes <huecodes@proton.me>")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Map HTTP and HTTPS services across hosts and ranges", long_about = None)]
pub struct Args {
    /// File with hosts, IPs and CIDR ranges, one per line
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub file: PathBuf,

    /// Also save the results as <FILE>.csv
    #[arg(long)]
    pub csv: bool,

    /// Also save full results, headers included, as <FILE>.json
    #[arg(long)]
    pub json: bool,

    /// Only probe ports 80 and 8080 (HTTP) and 443 (HTTPS)
    #[arg(long)]
    pub fast: bool,

    /// Number of concurrent workers [default: 30]
    #[arg(long, value_name = "INT")]
    pub threads: Option<usize>,

    /// Per-request timeout in seconds [default: 6]
    #[arg(short = 't', long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// HTTP ports to probe (e.g., "80,8000-8010")
    #[arg(long = "http-ports", value_name = "LIST")]
    pub http_ports: Option<PortList>,

    /// HTTPS ports to probe (e.g., "443,8443")
    #[arg(long = "https-ports", value_name = "LIST")]
    pub https_ports: Option<PortList>,

    /// Maximum requests per second across all workers (0 = unlimited)
    #[arg(short = 'r', long = "rate", value_name = "N")]
    pub rate_limit: Option<u32>,

    /// User-Agent header to send
    #[arg(short = 'A', long = "user-agent", value_name = "UA")]
    pub user_agent: Option<String>,

    /// Suppress progress and per-service lines
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to a settings file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub threads: usize,
    pub timeout_secs: u64,
    pub rate_limit: u32,
    pub user_agent: String,
    pub catalog: PortCatalog,
}

impl Args {
    /// Merge command-line values over the settings file.
    pub fn resolve(&self, settings: &AppSettings) -> CliResult<RunSettings> {
        let threads = self.threads.unwrap_or(settings.default_threads);
        if threads == 0 {
            return Err(ConfigError::InvalidValue {
                field: "threads",
                reason: "must be at least 1".to_string(),
            }
            .into());
        }

        let timeout_secs = self.timeout.unwrap_or(settings.default_timeout_secs);
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout",
                reason: "must be at least 1".to_string(),
            }
            .into());
        }

        let mut catalog = if self.fast {
            PortCatalog::fast()
        } else {
            settings.catalog()
        };
        if let Some(ref ports) = self.http_ports {
            catalog.http = ports.clone();
        }
        if let Some(ref ports) = self.https_ports {
            catalog.https = ports.clone();
        }

        Ok(RunSettings {
            threads,
            timeout_secs,
            rate_limit: self.rate_limit.unwrap_or(settings.default_rate_limit),
            user_agent: self
                .user_agent
                .clone()
                .unwrap_or_else(|| settings.user_agent.clone()),
            catalog,
        })
    }

    fn load_settings(&self) -> CliResult<AppSettings> {
        let settings = match self.config {
            Some(ref path) => AppSettings::load_from(path)?,
            None => match AppSettings::load() {
                Ok(settings) => settings,
                Err(ConfigError::DirectoryNotFound) => {
                    debug!("no configuration directory, using defaults");
                    AppSettings::default()
                }
                Err(e) => return Err(e.into()),
            },
        };
        Ok(settings)
    }

    /// Execute a complete run.
    pub async fn execute(&self) -> CliResult<()> {
        let settings = self.load_settings()?;
        let run = self.resolve(&settings)?;

        let hosts = load_hosts(&self.file)?;
        if hosts.is_empty() {
            return Err(CliError::EmptyInput(self.file.clone()));
        }

        let items = generate_work(&hosts, &run.catalog);

        if !self.quiet {
            output::print_run_header(hosts.len(), items.len(), run.threads, run.timeout_secs);
        }

        let probe_config = ProbeConfig::new(Duration::from_secs(run.timeout_secs))
            .with_user_agent(run.user_agent.as_str());
        let prober =
            HttpProber::new(probe_config).map_err(|e| CliError::ClientBuild(e.to_string()))?;

        let job = MapJobConfig::new(run.threads).with_rate_limit(run.rate_limit);
        let job = if self.quiet { job } else { job.with_progress() };

        let mut map_run = run_map(Arc::new(prober), items, job).await;
        let rows = build_rows(&mut map_run.results);

        if rows.is_empty() {
            output::print_warning("No responsive web services found; no report written.");
            return Ok(());
        }

        if self.csv {
            let path = sibling_path(&self.file, "csv");
            write_file(&path, &output::render_csv(&rows)?)?;
            if !self.quiet {
                output::print_success(&format!("CSV saved to: {}", path.display()));
            }
        }

        if self.json {
            let path = sibling_path(&self.file, "json");
            let json = output::render_json(&map_run.results)
                .map_err(|e| CliError::Other(e.to_string()))?;
            write_file(&path, &json)?;
            if !self.quiet {
                output::print_success(&format!("JSON saved to: {}", path.display()));
            }
        }

        let table = output::render_table(&rows);
        print!("{}", table);

        let path = sibling_path(&self.file, "table");
        write_file(&path, &table)?;
        if !self.quiet {
            output::print_success(&format!("ASCII table saved to: {}", path.display()));
            output::print_summary(map_run.items_probed, rows.len(), map_run.duration_ms);
        }

        Ok(())
    }
}

/// `<file>.<ext>`, keeping the input's own extension.
fn sibling_path(file: &Path, ext: &str) -> PathBuf {
    let mut name = OsString::from(file.as_os_str());
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

fn write_file(path: &Path, content: &str) -> CliResult<()> {
    fs::write(path, content).map_err(|e| CliError::OutputWrite {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
