//! # Table Display
//!
//! Fixed-width table rendering for catalog listings. Pure string builders:
//! nothing here touches stdout, so every format has a unit test.

use marquee_core::Item;

// =============================================================================
// Table Renderer
// =============================================================================

/// Renders a bordered table with per-column widths sized to content.
///
/// ```text
/// +-------+--------+-----------+
/// | Title | Genre  | Available |
/// +-------+--------+-----------+
/// | Dune  | Sci-Fi | 1         |
/// +-------+--------+-----------+
/// ```
fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if cell.len() > widths[i] {
                widths[i] = cell.len();
            }
        }
    }

    let border = {
        let mut line = String::from("+");
        for width in &widths {
            line.push_str(&"-".repeat(width + 2));
            line.push('+');
        }
        line
    };

    let format_row = |cells: &[String]| {
        let mut line = String::from("|");
        for (cell, width) in cells.iter().zip(widths.iter().copied()) {
            line.push_str(&format!(" {:<width$} |", cell, width = width));
        }
        line
    };

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();

    let mut out = String::new();
    out.push_str(&border);
    out.push('\n');
    out.push_str(&format_row(&header_cells));
    out.push('\n');
    out.push_str(&border);
    out.push('\n');
    for row in rows {
        out.push_str(&format_row(row));
        out.push('\n');
    }
    out.push_str(&border);
    out
}

// =============================================================================
// Catalog Views
// =============================================================================

/// Browse view: one row per title with shelf availability.
pub fn catalog_table(items: &[&Item]) -> String {
    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| {
            vec![
                item.title.clone(),
                item.genre.to_string(),
                item.classification.to_string(),
                item.available_copies.to_string(),
            ]
        })
        .collect();
    render_table(
        &["Title", "Genre", "Classification", "Copies Available"],
        &rows,
    )
}

/// Detail view of a single title.
pub fn item_details(item: &Item) -> String {
    let rows = vec![vec![
        item.title.clone(),
        item.genre.to_string(),
        item.classification.to_string(),
        item.duration_minutes.to_string(),
        format!("{} of {}", item.available_copies, item.total_copies),
        item.times_borrowed.to_string(),
    ]];
    render_table(
        &[
            "Title",
            "Genre",
            "Classification",
            "Duration (minutes)",
            "Copies Available",
            "Times Borrowed",
        ],
        &rows,
    )
}

/// A patron's current holds, in borrow order.
pub fn holds_table(items: &[&Item]) -> String {
    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| {
            vec![
                item.title.clone(),
                item.genre.to_string(),
                item.classification.to_string(),
            ]
        })
        .collect();
    render_table(&["Title", "Genre", "Classification"], &rows)
}

/// Most-borrowed ranking, rank column first.
pub fn top_borrowed_table(items: &[&Item]) -> String {
    let rows: Vec<Vec<String>> = items
        .iter()
        .enumerate()
        .map(|(rank, item)| {
            vec![
                (rank + 1).to_string(),
                item.title.clone(),
                item.genre.to_string(),
                item.classification.to_string(),
                item.times_borrowed.to_string(),
            ]
        })
        .collect();
    render_table(
        &["Rank", "Title", "Genre", "Classification", "Times Borrowed"],
        &rows,
    )
}
