//! Table geometry for the PDF report.
//!
//! Layout runs in two passes. The first measures every header and body cell
//! once and fixes the column widths; the second places cells on a fixed-height
//! grid using prefix sums over those widths. Coordinates are top-down (y grows
//! towards the bottom of the page); the writer flips them.

use crate::config::settings::LayoutSettings;
use crate::domain::model::TableSpec;
use crate::domain::ports::TextMeasure;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CellBox {
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PositionedCell {
    /// Grid row, 0 being the header.
    pub row: usize,
    pub column: usize,
    pub bounds: CellBox,
    pub text: String,
    /// Top-left corner of the text, inset inside `bounds`.
    pub text_x: f64,
    pub text_y: f64,
}

impl PositionedCell {
    pub fn is_header(&self) -> bool {
        self.row == 0
    }

    fn shifted(&self, dy: f64) -> Self {
        let mut cell = self.clone();
        cell.bounds.y += dy;
        cell.text_y += dy;
        cell
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableLayout {
    pub column_widths: Vec<f64>,
    pub column_offsets: Vec<f64>,
    pub row_height: f64,
    /// Row-major, header first.
    pub cells: Vec<PositionedCell>,
}

/// Pass 1: `max(measure(header), max(measure(cell))) + padding` per column.
pub fn column_widths(table: &TableSpec, measure: &dyn TextMeasure, padding: f64) -> Vec<f64> {
    (0..table.column_count())
        .map(|column| {
            let widest = (0..table.rows.len())
                .map(|row| measure.width_of(table.cell(row, column)))
                .fold(measure.width_of(&table.headers[column]), f64::max);
            widest + padding
        })
        .collect()
}

/// Left edge of every column: `start_x` plus the widths before it.
pub fn column_offsets(start_x: f64, widths: &[f64]) -> Vec<f64> {
    widths
        .iter()
        .scan(start_x, |cursor, width| {
            let left = *cursor;
            *cursor += width;
            Some(left)
        })
        .collect()
}

/// Pass 2: positions every cell once the widths are final.
pub fn layout_table(
    table: &TableSpec,
    measure: &dyn TextMeasure,
    settings: &LayoutSettings,
    start_x: f64,
    start_y: f64,
) -> TableLayout {
    let column_widths = column_widths(table, measure, settings.column_padding);
    let column_offsets = column_offsets(start_x, &column_widths);
    let row_height = settings.row_height;

    let header = table.headers.iter().map(String::as_str);
    let header_row = std::iter::once(header.collect::<Vec<_>>());
    let body_rows = (0..table.rows.len()).map(|row| {
        (0..table.column_count())
            .map(|column| table.cell(row, column))
            .collect::<Vec<_>>()
    });

    let mut cells = Vec::with_capacity((table.rows.len() + 1) * table.column_count());
    for (row, texts) in header_row.chain(body_rows).enumerate() {
        let y = start_y + row as f64 * row_height;
        for (column, text) in texts.into_iter().enumerate() {
            let x = column_offsets[column];
            cells.push(PositionedCell {
                row,
                column,
                bounds: CellBox {
                    x,
                    y,
                    width: column_widths[column],
                    height: row_height,
                },
                text: text.to_string(),
                text_x: x + settings.text_inset_x,
                text_y: y + settings.text_inset_y,
            });
        }
    }

    TableLayout {
        column_widths,
        column_offsets,
        row_height,
        cells,
    }
}

impl TableLayout {
    pub fn total_width(&self) -> f64 {
        self.column_widths.iter().sum()
    }

    /// Grid rows including the header.
    pub fn row_count(&self) -> usize {
        self.cells.last().map_or(0, |cell| cell.row + 1)
    }

    pub fn data_row_count(&self) -> usize {
        self.row_count().saturating_sub(1)
    }

    /// Cells are stored row-major with one cell per column, so a grid row is
    /// a fixed-size slice.
    pub fn row_cells(&self, row: usize) -> &[PositionedCell] {
        let columns = self.column_widths.len();
        let start = row * columns;
        self.cells.get(start..start + columns).unwrap_or(&[])
    }

    pub fn row(&self, row: usize) -> impl Iterator<Item = &PositionedCell> {
        self.row_cells(row).iter()
    }

    /// Splits the grid over pages. The first page keeps the computed
    /// positions; a row whose box would pass `page_bottom` moves to a new page
    /// starting at `continuation_top`, optionally under a repeated header.
    /// Widths and x positions never change between pages.
    pub fn paginate(
        &self,
        page_bottom: f64,
        continuation_top: f64,
        repeat_header: bool,
    ) -> Vec<Vec<PositionedCell>> {
        let header: Vec<&PositionedCell> = self.row(0).collect();
        let Some(first) = header.first() else {
            return vec![Vec::new()];
        };
        let origin_y = first.bounds.y;

        let mut pages = vec![header.iter().map(|cell| (*cell).clone()).collect::<Vec<_>>()];
        let mut cursor = origin_y + self.row_height;
        let mut rows_on_page = 0usize;
        let mut continuation = false;

        for row in 1..self.row_count() {
            let overflows = cursor + self.row_height > page_bottom;
            // 續頁上連一列都放不下時照樣放，避免無限換頁
            if overflows && (rows_on_page > 0 || !continuation) {
                pages.push(Vec::new());
                cursor = continuation_top;
                rows_on_page = 0;
                continuation = true;

                if repeat_header {
                    let dy = cursor - origin_y;
                    if let Some(page) = pages.last_mut() {
                        page.extend(header.iter().map(|cell| cell.shifted(dy)));
                    }
                    cursor += self.row_height;
                }
            }

            let dy = cursor - (origin_y + row as f64 * self.row_height);
            if let Some(page) = pages.last_mut() {
                page.extend(self.row(row).map(|cell| cell.shifted(dy)));
            }
            cursor += self.row_height;
            rows_on_page += 1;
        }

        tracing::debug!(
            "Paginated {} data rows over {} page(s)",
            self.data_row_count(),
            pages.len()
        );
        pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn fixed_measure(widths: &[(&str, f64)]) -> impl Fn(&str) -> f64 {
        let widths: HashMap<String, f64> = widths
            .iter()
            .map(|(text, width)| (text.to_string(), *width))
            .collect();
        move |text: &str| widths.get(text).copied().unwrap_or(0.0)
    }

    fn char_measure(text: &str) -> f64 {
        text.chars().count() as f64 * 6.0
    }

    fn sample_table() -> TableSpec {
        let mut table = TableSpec::new(["Employee Name", "Skills"]);
        table.push_row(["Ann", "Go: Expert"]);
        table
    }

    #[test]
    fn test_measured_widths_scenario() {
        let measure = fixed_measure(&[
            ("Employee Name", 120.0),
            ("Skills", 60.0),
            ("Ann", 40.0),
            ("Go: Expert", 90.0),
        ]);
        let layout = layout_table(&sample_table(), &measure, &LayoutSettings::default(), 72.0, 130.0);

        assert_eq!(layout.column_widths, vec![140.0, 110.0]);

        let header: Vec<_> = layout.row(0).collect();
        assert_eq!(header[0].bounds.x, 72.0);
        assert_eq!(header[1].bounds.x, 72.0 + 140.0);
        assert_eq!(header[0].bounds.y, 130.0);

        let body: Vec<_> = layout.row(1).collect();
        assert_eq!(body[0].bounds.y, 130.0 + 20.0);
        assert_eq!(body[1].bounds.width, 110.0);
    }

    #[test]
    fn test_text_inset() {
        let layout = layout_table(&sample_table(), &char_measure, &LayoutSettings::default(), 0.0, 0.0);
        let cell = layout.row(1).nth(1).unwrap();
        assert_eq!(cell.text, "Go: Expert");
        assert_eq!(cell.text_x, cell.bounds.x + 10.0);
        assert_eq!(cell.text_y, cell.bounds.y + 5.0);
    }

    #[test]
    fn test_widths_are_order_independent() {
        let mut forward = TableSpec::new(["Employee Name", "Skills"]);
        forward.push_row(["Ann", "Go: Expert"]);
        forward.push_row(["Bartholomew", "SQL: Beginner, Rust: Proficient"]);
        forward.push_row(["Cid", "C: Expert"]);

        let mut reversed = forward.clone();
        reversed.rows.reverse();

        assert_eq!(
            column_widths(&forward, &char_measure, 20.0),
            column_widths(&reversed, &char_measure, 20.0)
        );
    }

    #[test]
    fn test_every_cell_in_a_column_shares_width_and_edge() {
        let mut table = TableSpec::new(["Employee Name", "Skills"]);
        table.push_row(["A", "short"]);
        table.push_row(["A much longer employee name", "x"]);
        let layout = layout_table(&table, &char_measure, &LayoutSettings::default(), 10.0, 10.0);

        for cell in &layout.cells {
            assert_eq!(cell.bounds.x, layout.column_offsets[cell.column]);
            assert_eq!(cell.bounds.width, layout.column_widths[cell.column]);
        }
        assert_eq!(layout.total_width(), layout.column_widths.iter().sum::<f64>());
    }

    #[test]
    fn test_empty_body_is_header_only() {
        let table = TableSpec::new(["Employee Name", "Skills"]);
        let layout = layout_table(&table, &char_measure, &LayoutSettings::default(), 0.0, 0.0);
        assert_eq!(layout.row_count(), 1);
        assert_eq!(layout.data_row_count(), 0);
        assert_eq!(layout.cells.len(), 2);
        assert_eq!(layout.column_widths[0], char_measure("Employee Name") + 20.0);
    }

    #[test]
    fn test_row_slices_match_grid_rows() {
        let mut table = TableSpec::new(["Employee Name", "Skills", "Team"]);
        for i in 0..5 {
            table.push_row([format!("Employee {}", i), "Go: Expert".to_string()]);
        }
        let layout = layout_table(&table, &char_measure, &LayoutSettings::default(), 0.0, 0.0);

        for row in 0..layout.row_count() {
            let cells = layout.row_cells(row);
            assert_eq!(cells.len(), 3);
            assert!(cells.iter().all(|cell| cell.row == row));
            let columns: Vec<usize> = cells.iter().map(|cell| cell.column).collect();
            assert_eq!(columns, vec![0, 1, 2]);
        }
        // 短列補空字串
        assert_eq!(layout.row_cells(3)[2].text, "");
        assert!(layout.row_cells(layout.row_count()).is_empty());
    }

    #[test]
    fn test_column_offsets_are_prefix_sums() {
        assert_eq!(column_offsets(5.0, &[10.0, 20.0, 30.0]), vec![5.0, 15.0, 35.0]);
        assert!(column_offsets(5.0, &[]).is_empty());
    }

    #[test]
    fn test_paginate_fits_on_one_page() {
        let layout = layout_table(&sample_table(), &char_measure, &LayoutSettings::default(), 0.0, 100.0);
        let pages = layout.paginate(720.0, 72.0, true);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0], layout.cells);
    }

    #[test]
    fn test_paginate_repeats_header() {
        let mut table = TableSpec::new(["Employee Name", "Skills"]);
        for i in 0..10 {
            table.push_row([format!("Employee {}", i), "Go: Expert".to_string()]);
        }
        let layout = layout_table(&table, &char_measure, &LayoutSettings::default(), 0.0, 0.0);

        // 每頁高度 100：第一頁 header + 4 列，續頁 header + 4 列
        let pages = layout.paginate(100.0, 0.0, true);
        assert_eq!(pages.len(), 3);
        for page in &pages {
            assert!(page[0].is_header());
            assert_eq!(page[0].bounds.y, 0.0);
            assert!(page.iter().all(|cell| cell.bounds.bottom() <= 100.0));
        }
        let data_cells: usize = pages
            .iter()
            .map(|page| page.iter().filter(|cell| !cell.is_header()).count())
            .sum();
        assert_eq!(data_cells, 20);

        let second_page_first_row = pages[1].iter().find(|cell| !cell.is_header()).unwrap();
        assert_eq!(second_page_first_row.text, "Employee 4");
        assert_eq!(second_page_first_row.bounds.y, 20.0);
        assert_eq!(second_page_first_row.bounds.x, layout.column_offsets[0]);
    }

    #[test]
    fn test_paginate_without_header_repeat() {
        let mut table = TableSpec::new(["Employee Name", "Skills"]);
        for i in 0..6 {
            table.push_row([format!("Employee {}", i), "SQL: Beginner".to_string()]);
        }
        let layout = layout_table(&table, &char_measure, &LayoutSettings::default(), 0.0, 0.0);
        let pages = layout.paginate(100.0, 0.0, false);
        assert_eq!(pages.len(), 2);
        assert!(pages[1].iter().all(|cell| !cell.is_header()));
        assert_eq!(pages[1].len(), 4);
    }
}
