//! JSON output formatting.

use crate::scanner::ProbeResult;

/// Render full results, headers included, as pretty JSON.
pub fn render_json(results: &[ProbeResult]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(results)
}
