//! CSV output formatting.

use crate::report::ReportRow;
use std::io;

/// Write rows as CSV, one record per row and no header record.
pub fn write_csv<W: io::Write>(rows: &[ReportRow], writer: W) -> csv::Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    for row in rows {
        wtr.write_record(row.cells())?;
    }

    wtr.flush()?;
    Ok(())
}

/// Render rows as a CSV string.
pub fn render_csv(rows: &[ReportRow]) -> csv::Result<String> {
    let mut buf = Vec::new();
    write_csv(rows, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_rows_without_header() {
        let rows = vec![
            ReportRow {
                base_url: "http://example.com:80/".to_string(),
                status: 200,
                title: Some("Example, Inc.".to_string()),
                length: 1256,
                server: Some("ECS (dcb/7F84)".to_string()),
            },
            ReportRow {
                base_url: "https://example.com:443/".to_string(),
                status: 404,
                title: None,
                length: 0,
                server: None,
            },
        ];

        let csv = render_csv(&rows).unwrap();
        assert_eq!(
            csv,
            "http://example.com:80/,200,\"Example, Inc.\",1256,ECS (dcb/7F84)\n\
             https://example.com:443/,404,,0,\n"
        );
    }

    #[test]
    fn test_csv_empty() {
        assert_eq!(render_csv(&[]).unwrap(), "");
    }
}
