//! Text rendering of the scheduling timeline
//!
//! Draws the window's columns as a character track and places each work
//! order on it at the percentage position computed by the layout engine.

use super::truncate;
use schedgrid_db::{WorkCenter, WorkOrder, WorkOrderStatus};
use schedgrid_timeline::{LayoutMode, TimelineResult, TimelineWindow};

/// Width of the label area left of the track
const LABEL_WIDTH: usize = 32;

/// Default number of character cells in the track
pub const DEFAULT_TRACK_WIDTH: usize = 60;

/// Narrowest track that still shows a grid
pub const MIN_TRACK_WIDTH: usize = 10;

/// Convert a percentage of the visible range into a track cell, clamped to the track.
fn to_cell(percent: f64, track_width: usize) -> usize {
    let cell = (percent / 100.0 * track_width as f64).round();
    if cell <= 0.0 {
        0
    } else if cell >= track_width as f64 {
        track_width
    } else {
        cell as usize
    }
}

fn status_indicator(status: WorkOrderStatus) -> &'static str {
    match status {
        WorkOrderStatus::Open => "[ ]",
        WorkOrderStatus::InProgress => "[>]",
        WorkOrderStatus::Complete => "[x]",
        WorkOrderStatus::Blocked => "[!]",
    }
}

fn bar_char(status: WorkOrderStatus) -> char {
    match status {
        WorkOrderStatus::Open => '\u{2592}',       // medium shade
        WorkOrderStatus::InProgress => '\u{2593}', // dark shade
        WorkOrderStatus::Complete => '\u{2588}',   // full block
        WorkOrderStatus::Blocked => '\u{2591}',    // light shade
    }
}

/// Share of the track that the layout's 100% covers.
///
/// Linear layout measures against `range.end()`, the last column's anchor,
/// but the track also has to show that column's own period.
fn track_scale(window: &TimelineWindow) -> TimelineResult<f64> {
    match window.granularity().layout_mode() {
        LayoutMode::MonthGrid => Ok(1.0),
        LayoutMode::Linear => {
            let range = window.range();
            let laid_out = (range.end() - range.start()).num_days();
            let shown = (window.period_end()? - range.start()).num_days();
            Ok(laid_out as f64 / shown as f64)
        }
    }
}

/// First track cell of every column.
fn column_cells(
    window: &TimelineWindow,
    scale: f64,
    track_width: usize,
) -> TimelineResult<Vec<usize>> {
    window
        .columns()
        .iter()
        .map(|column| {
            let position = window.bar_position(column.date(), column.date())?;
            Ok(to_cell(position.left() * scale, track_width).min(track_width - 1))
        })
        .collect()
}

/// Column labels centered in their cells; narrow columns show a prefix.
fn build_date_header(window: &TimelineWindow, starts: &[usize], track_width: usize) -> String {
    let mut header = vec![' '; track_width];

    for (i, column) in window.columns().iter().enumerate() {
        let start = starts[i];
        let end = starts.get(i + 1).copied().unwrap_or(track_width);
        let col_width = end.saturating_sub(start);
        let label: Vec<char> = column.label().chars().collect();
        let padding = col_width.saturating_sub(label.len()) / 2;

        for (offset, c) in label.iter().take(col_width).enumerate() {
            let pos = start + padding + offset;
            if pos < track_width {
                header[pos] = *c;
            }
        }
    }

    header.into_iter().collect()
}

/// Horizontal rule with a junction at every column boundary.
fn build_separator(starts: &[usize], track_width: usize) -> String {
    let mut separator = vec!['\u{2500}'; track_width];
    for &start in starts {
        if start > 0 {
            separator[start] = '\u{253C}';
        }
    }
    separator[0] = '\u{251C}';
    if track_width > 1 {
        separator[track_width - 1] = '\u{2524}';
    }
    separator.into_iter().collect()
}

/// Caret under the column containing today, if it is visible.
fn build_today_marker(window: &TimelineWindow, starts: &[usize], track_width: usize) -> Option<String> {
    let index = window.current_column_index()?;
    let mut marker = vec![' '; track_width];
    marker[starts[index]] = '^';
    Some(marker.into_iter().collect::<String>().trim_end().to_string())
}

fn build_order_line(
    window: &TimelineWindow,
    order: &WorkOrder,
    scale: f64,
    track_width: usize,
) -> TimelineResult<String> {
    let position = window.bar_position(order.start_date, order.end_date)?;
    let left = position.left() * scale;
    let right = position.right() * scale;

    let mut track = vec![' '; track_width];
    if right > 0.0 && left < 100.0 {
        let start = to_cell(left, track_width).min(track_width - 1);
        let end = to_cell(right, track_width).max(start + 1);
        for cell in &mut track[start..end] {
            *cell = bar_char(order.status);
        }
    }

    let label = format!(
        "  {} {} {}",
        order.id,
        status_indicator(order.status),
        order.name
    );
    Ok(format!(
        "{:<label_w$}{}  left {:.2}%  width {:.2}%",
        truncate(&label, LABEL_WIDTH - 1),
        track.into_iter().collect::<String>(),
        position.left(),
        position.width(),
        label_w = LABEL_WIDTH,
    ))
}

/// Render the timeline window with one bar per work order, grouped by work center.
///
/// `centers` fixes the group order; orders on centers not listed are skipped.
/// `track_width` is raised to [`MIN_TRACK_WIDTH`] if smaller.
///
/// # Errors
///
/// Propagates layout errors, e.g. a zero-length day range.
pub fn render_timeline(
    window: &TimelineWindow,
    centers: &[WorkCenter],
    orders: &[WorkOrder],
    track_width: usize,
) -> TimelineResult<String> {
    let track_width = track_width.max(MIN_TRACK_WIDTH);
    let range = window.range();
    let scale = track_scale(window)?;
    let starts = column_cells(window, scale, track_width)?;
    let pad = " ".repeat(LABEL_WIDTH);

    let mut summary = format!(
        "Zoom: {}  Range: {} to {}  Columns: {}",
        window.granularity(),
        range.start(),
        range.end(),
        window.columns().len()
    );
    if let Some(index) = window.current_column_index() {
        summary.push_str(&format!("  Today: {}", window.columns()[index].label()));
    }

    let mut lines = vec![
        summary,
        String::new(),
        format!("{}{}", pad, build_date_header(window, &starts, track_width).trim_end()),
        format!("{}{}", pad, build_separator(&starts, track_width)),
    ];
    if let Some(marker) = build_today_marker(window, &starts, track_width) {
        lines.push(format!("{}{}", pad, marker));
    }

    if centers.is_empty() {
        lines.push("No work centers found.".to_string());
        return Ok(lines.join("\n"));
    }

    for center in centers {
        lines.push(format!("{} ({})", center.name, center.id));
        let mut any = false;
        for order in orders.iter().filter(|o| o.work_center == center.id) {
            lines.push(build_order_line(window, order, scale, track_width)?);
            any = true;
        }
        if !any {
            lines.push("  (no work orders in range)".to_string());
        }
    }

    Ok(lines.join("\n"))
}
