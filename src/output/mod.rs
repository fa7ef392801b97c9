//! Output formatting module.
//!
//! Provides the console messages printed during a run and the table, CSV
//! and JSON renderings of the final report.

mod csv_format;
mod json_format;
mod plain;
mod table;

pub use csv_format::{render_csv, write_csv};
pub use json_format::render_json;
pub use plain::{
    print_error, print_run_header, print_success, print_summary, print_warning, probe_line,
};
pub use table::render_table;
