//! Output formatting module for Schedgrid
//!
//! Provides table formatting and the text timeline for CLI output.

pub mod timeline;

pub use timeline::render_timeline;

use schedgrid_db::{DbError, WorkCenter, WorkOrder};
use serde::Serialize;

/// Maximum width for name columns before truncation
const MAX_NAME_WIDTH: usize = 30;

/// Truncate a string to the specified maximum width, adding ellipsis if needed.
pub(crate) fn truncate(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width <= 3 {
        s.chars().take(max_width).collect()
    } else {
        let kept: String = s.chars().take(max_width - 3).collect();
        format!("{}...", kept)
    }
}

/// Width of a column: the widest cell, never narrower than its header.
fn column_width<'a>(header: &str, cells: impl Iterator<Item = &'a str>) -> usize {
    cells
        .map(|c| c.chars().count())
        .max()
        .unwrap_or(0)
        .max(header.len())
}

/// Render rows under a header and a dashed separator, two spaces between columns.
fn render_table<const N: usize>(headers: [&str; N], rows: &[[String; N]]) -> String {
    let mut widths = [0usize; N];
    for (i, width) in widths.iter_mut().enumerate() {
        *width = column_width(headers[i], rows.iter().map(|r| r[i].as_str()));
    }

    let render_row = |cells: [&str; N]| -> String {
        let line: Vec<String> = cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, w)| format!("{:<w$}", cell, w = *w))
            .collect();
        line.join("  ").trim_end().to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(render_row(headers));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in rows {
        lines.push(render_row(std::array::from_fn(|i| row[i].as_str())));
    }
    lines.join("\n")
}

/// Format work centers into an aligned table string.
///
/// ```text
/// ID        Name
/// --------  -----------
/// wc1a2b3c  CNC Mill
/// ```
pub fn format_center_table(centers: &[WorkCenter]) -> String {
    if centers.is_empty() {
        return "No work centers found.".to_string();
    }

    let rows: Vec<[String; 2]> = centers
        .iter()
        .map(|c| [c.id.clone(), truncate(&c.name, MAX_NAME_WIDTH)])
        .collect();
    render_table(["ID", "Name"], &rows)
}

/// Format work orders into an aligned table string.
///
/// ```text
/// ID        Center    Status       Start       End         Name
/// --------  --------  -----------  ----------  ----------  -------------
/// wo1a2b3c  wc9f8e7d  in_progress  2024-03-01  2024-03-10  Mill housings
/// ```
pub fn format_order_table(orders: &[WorkOrder]) -> String {
    if orders.is_empty() {
        return "No work orders found.".to_string();
    }

    let rows: Vec<[String; 6]> = orders
        .iter()
        .map(|o| {
            [
                o.id.clone(),
                o.work_center.clone(),
                o.status.to_string(),
                o.start_date.to_string(),
                o.end_date.to_string(),
                truncate(&o.name, MAX_NAME_WIDTH),
            ]
        })
        .collect();
    render_table(["ID", "Center", "Status", "Start", "End", "Name"], &rows)
}

/// Pretty-printed JSON for machine consumption.
pub fn format_json<T: Serialize + ?Sized>(value: &T) -> Result<String, DbError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| DbError::validation(format!("Failed to serialize output: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use schedgrid_db::WorkOrderStatus;

    fn order(id: &str, name: &str, status: WorkOrderStatus) -> WorkOrder {
        WorkOrder {
            id: id.to_string(),
            name: name.to_string(),
            work_center: "wc000001".to_string(),
            status,
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_format_empty_tables() {
        assert_eq!(format_center_table(&[]), "No work centers found.");
        assert_eq!(format_order_table(&[]), "No work orders found.");
    }

    #[test]
    fn test_format_center_table() {
        let centers = vec![
            WorkCenter {
                id: "wc000001".to_string(),
                name: "CNC Mill".to_string(),
                created_at: None,
            },
            WorkCenter {
                id: "wc000002".to_string(),
                name: "Paint Booth".to_string(),
                created_at: None,
            },
        ];

        let result = format_center_table(&centers);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 4, "Expected header, separator and 2 rows");
        assert_eq!(lines[0].split_whitespace().collect::<Vec<_>>(), vec!["ID", "Name"]);
        assert!(lines[1].chars().all(|c| c == '-' || c == ' '));
        assert_eq!(lines[2], "wc000001  CNC Mill");
        assert_eq!(lines[3], "wc000002  Paint Booth");
    }

    #[test]
    fn test_format_order_table_columns() {
        let orders = vec![order("wo000001", "Mill housings", WorkOrderStatus::InProgress)];

        let result = format_order_table(&orders);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 3);

        let header: Vec<&str> = lines[0].split_whitespace().collect();
        assert_eq!(header, vec!["ID", "Center", "Status", "Start", "End", "Name"]);

        let data: Vec<&str> = lines[2].split_whitespace().collect();
        assert_eq!(data[0], "wo000001");
        assert_eq!(data[1], "wc000001");
        assert_eq!(data[2], "in_progress");
        assert_eq!(data[3], "2024-03-01");
        assert_eq!(data[4], "2024-03-10");
        assert_eq!(data[5..].join(" "), "Mill housings");
    }

    #[test]
    fn test_long_names_are_truncated() {
        let long = "A".repeat(50);
        let orders = vec![order("wo000001", &long, WorkOrderStatus::Open)];
        let result = format_order_table(&orders);
        let row = result.lines().nth(2).unwrap();
        assert!(row.ends_with(&format!("{}...", "A".repeat(MAX_NAME_WIDTH - 3))));
    }

    #[test]
    fn test_format_json() {
        let orders = vec![order("wo000001", "Mill housings", WorkOrderStatus::Blocked)];
        let json: serde_json::Value = serde_json::from_str(&format_json(&orders).unwrap()).unwrap();
        assert_eq!(json[0]["id"], "wo000001");
        assert_eq!(json[0]["status"], "blocked");
        assert_eq!(json[0]["end_date"], "2024-03-10");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly10!", 10), "exactly10!");
        assert_eq!(truncate("this is too long", 10), "this is...");
        assert_eq!(truncate("abcdef", 3), "abc");
        assert_eq!(truncate("Fräsmaschine", 6), "Frä...");
    }
}
