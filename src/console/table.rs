//! Boxed text table for the todo list.
//!
//! Column widths are measured in terminal cells, so wide (CJK) titles
//! still line up.

use std::fmt::Write as _;

use unicode_width::UnicodeWidthStr;

use crate::core::todo::TodoRow;

pub const HEADERS: [&str; 5] = ["#", "Title", "Completed", "Created At", "Completed At"];

/// Renders rows as a box-drawn table, one line per row plus borders.
pub fn render(rows: &[TodoRow]) -> String {
    let cells: Vec<[String; 5]> = rows
        .iter()
        .map(|row| {
            [
                row.index.to_string(),
                row.title.clone(),
                row.completed.to_string(),
                row.created_at.clone(),
                row.completed_at.clone(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|header| header.width());
    for line in &cells {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.width());
        }
    }

    let mut out = String::new();
    border(&mut out, &widths, '┌', '┬', '┐');
    line(&mut out, &widths, &HEADERS);
    border(&mut out, &widths, '├', '┼', '┤');
    for row in &cells {
        line(&mut out, &widths, row);
    }
    border(&mut out, &widths, '└', '┴', '┘');
    out
}

fn border(out: &mut String, widths: &[usize; 5], left: char, mid: char, right: char) {
    out.push(left);
    for (i, width) in widths.iter().enumerate() {
        if i > 0 {
            out.push(mid);
        }
        out.push_str(&"─".repeat(width + 2));
    }
    out.push(right);
    out.push('\n');
}

fn line<S: AsRef<str>>(out: &mut String, widths: &[usize; 5], cells: &[S; 5]) {
    out.push('│');
    for (cell, width) in cells.iter().zip(widths) {
        let cell = cell.as_ref();
        // Pad by display width; format!'s `{:<n}` counts chars, not cells
        let pad = width - cell.width();
        let _ = write!(out, " {}{} │", cell, " ".repeat(pad));
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(index: usize, title: &str, completed: bool) -> TodoRow {
        TodoRow {
            index,
            title: title.to_string(),
            completed,
            created_at: "2024-11-02 10:15:30".to_string(),
            completed_at: if completed {
                "2024-11-02 11:00:00".to_string()
            } else {
                String::new()
            },
        }
    }

    #[test]
    fn test_empty_table_has_header_only() {
        let table = render(&[]);
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[1],
            "│ # │ Title │ Completed │ Created At │ Completed At │"
        );
    }

    #[test]
    fn test_rows_are_listed_in_order() {
        let table = render(&[row(0, "buy milk", false), row(1, "walk dog", true)]);
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[3].starts_with("│ 0 │ buy milk │ false"));
        assert!(lines[4].starts_with("│ 1 │ walk dog │ true "));
        assert!(lines[4].contains("2024-11-02 11:00:00"));
    }

    #[test]
    fn test_all_lines_have_equal_display_width() {
        let table = render(&[row(0, "吃一个榴莲大福", false), row(1, "x", true)]);
        let widths: Vec<_> = table.lines().map(|line| line.width()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{widths:?}");
    }
}
