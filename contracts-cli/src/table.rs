//! Plain-text drawing of a rendered table

use std::fmt::Write;

use contracts_lib::view::Body;
use contracts_lib::view::Cell;
use contracts_lib::view::PageLink;
use contracts_lib::view::Rendered;
use contracts_lib::view::SortIndicator;
use contracts_lib::view::TableRender;

const GAP: &str = "  ";

/// Draws the table as aligned columns followed by the pager.
pub fn draw<R>(rendered: &Rendered<'_, R>) -> String {
    match rendered {
        Rendered::Loading => "Loading...\n".to_string(),
        Rendered::Table(table) => draw_table(table),
    }
}

fn draw_table<R>(table: &TableRender<'_, R>) -> String {
    let mut out = String::new();

    if let Some(search) = table.search.as_deref().filter(|s| !s.is_empty()) {
        let _ = writeln!(out, "Search: {search}");
    }
    for filter in &table.filters {
        let selected = filter
            .selected
            .as_ref()
            .map_or(filter.all_label.clone(), ToString::to_string);
        let options: Vec<String> = filter.options.iter().map(ToString::to_string).collect();
        let _ = writeln!(out, "{}: {selected}  ({})", filter.field, options.join(", "));
    }

    let headers: Vec<String> = table
        .header
        .iter()
        .map(|h| match h.indicator {
            Some(SortIndicator::Ascending) => format!("{} ▲", h.label),
            Some(SortIndicator::Descending) => format!("{} ▼", h.label),
            _ => h.label.clone(),
        })
        .collect();

    let rows = match &table.body {
        Body::Empty { title, hint } => {
            let _ = writeln!(out, "{}", headers.join(GAP));
            let _ = writeln!(out, "\n{title}\n{hint}");
            return out;
        }
        Body::Rows(rows) => rows,
    };

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.cells.iter().map(cell_text).collect())
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            cells
                .iter()
                .filter_map(|row| row.get(i))
                .map(|c| c.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let _ = writeln!(out, "{}", line(&headers, &widths));
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", line(&rule, &widths));
    for row in &cells {
        let _ = writeln!(out, "{}", line(row, &widths));
    }

    if let Some(pager) = &table.pager {
        let links: Vec<String> = pager
            .links
            .iter()
            .map(|link| match link {
                PageLink::Page { number, current: true } => format!("[{number}]"),
                PageLink::Page { number, .. } => number.to_string(),
                PageLink::Ellipsis => "…".to_string(),
            })
            .collect();
        let _ = writeln!(out, "\n{}", pager.summary);
        let _ = writeln!(out, "Pages: {}", links.join(" "));
    }

    out
}

fn cell_text(cell: &Cell) -> String {
    match cell {
        Cell::Badge { label, .. } => format!("[{label}]"),
        other => other.to_string(),
    }
}

fn line(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    padded.join(GAP).trim_end().to_string()
}
