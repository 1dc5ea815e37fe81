pub mod layout;
pub mod metrics;
pub mod writer;

use crate::config::settings::ReportSettings;
use crate::domain::model::TableSpec;
use crate::domain::ports::TextMeasure;
use crate::utils::error::Result;
use chrono::Utc;
use layout::{layout_table, TableLayout};
use metrics::HelveticaMetrics;
use writer::{write_pdf, DocumentInfo, PageCanvas};

const PRODUCER: &str = concat!("skill-matrix ", env!("CARGO_PKG_VERSION"));

/// Where the table starts: below the title line plus one blank line.
pub fn table_origin(settings: &ReportSettings) -> (f64, f64) {
    let title = HelveticaMetrics::new(settings.page.title_font_size);
    let margin = settings.page.margin;
    (margin, margin + 2.0 * title.line_height())
}

/// Geometry of the report table on the configured page, before pagination.
pub fn layout_report_table(table: &TableSpec, settings: &ReportSettings) -> TableLayout {
    let body = HelveticaMetrics::new(settings.page.font_size);
    let (start_x, start_y) = table_origin(settings);
    layout_table(table, &body, &settings.layout, start_x, start_y)
}

/// Title centred between the margins, then the bordered table, continuing on
/// further pages when it runs past the bottom margin.
pub fn render_pdf(table: &TableSpec, settings: &ReportSettings) -> Result<Vec<u8>> {
    let page = &settings.page;
    let (page_width, page_height) = page.size.dimensions_pt();
    let title_metrics = HelveticaMetrics::new(page.title_font_size);

    let layout = layout_report_table(table, settings);
    tracing::debug!(
        "PDF table layout: {} columns, widths {:?}, total width {:.2}",
        layout.column_widths.len(),
        layout.column_widths,
        layout.total_width()
    );
    if layout.total_width() > page_width - 2.0 * page.margin {
        tracing::warn!(
            "Table width {:.2}pt exceeds the printable width; columns will run off the page",
            layout.total_width()
        );
    }

    let pages = layout.paginate(page_height - page.margin, page.margin, page.repeat_header);

    let mut canvases = Vec::with_capacity(pages.len());
    for (index, cells) in pages.iter().enumerate() {
        let mut canvas = PageCanvas::new(page_height);

        if index == 0 {
            let content_width = page_width - 2.0 * page.margin;
            let title_x =
                page.margin + (content_width - title_metrics.width_of(&settings.title)) / 2.0;
            canvas.text(page.title_font_size, title_x, page.margin, &settings.title)?;
        }

        for cell in cells {
            canvas.stroke_rect(&cell.bounds)?;
            canvas.text(page.font_size, cell.text_x, cell.text_y, &cell.text)?;
        }
        canvases.push(canvas);
    }

    let info = DocumentInfo {
        title: settings.title.clone(),
        producer: PRODUCER.to_string(),
        created_at: page.include_timestamp.then(Utc::now),
    };
    write_pdf(&canvases, (page_width, page_height), &info)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf_text(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).to_string()
    }

    #[test]
    fn test_origin_sits_below_title() {
        let settings = ReportSettings::default();
        let (x, y) = table_origin(&settings);
        assert_eq!(x, 72.0);
        assert!((y - (72.0 + 2.0 * 1.156 * 25.0)).abs() < 1e-9);
    }

    #[test]
    fn test_header_only_document() {
        let mut settings = ReportSettings::default();
        settings.page.include_timestamp = false;
        let table = TableSpec::new(["Employee Name", "Skills"]);

        let pdf = render_pdf(&table, &settings).unwrap();
        let text = pdf_text(&pdf);
        assert!(text.contains("(Skill Matrix Report) Tj"));
        assert!(text.contains("(Employee Name) Tj"));
        assert!(text.contains("(Skills) Tj"));
        assert_eq!(text.matches(" re S").count(), 2);
        assert!(text.contains("/Count 1"));
    }

    #[test]
    fn test_rows_are_drawn_in_order() {
        let mut settings = ReportSettings::default();
        settings.page.include_timestamp = false;
        let mut table = TableSpec::new(["Employee Name", "Skills"]);
        table.push_row(["Ann", "Go: Expert, SQL: Beginner"]);
        table.push_row(["Bob", "Rust: Proficient"]);

        let text = pdf_text(&render_pdf(&table, &settings).unwrap());
        let ann = text.find("(Ann) Tj").unwrap();
        let bob = text.find("(Bob) Tj").unwrap();
        assert!(ann < bob);
        assert_eq!(text.matches(" re S").count(), 6);
    }

    #[test]
    fn test_long_tables_span_pages() {
        let mut settings = ReportSettings::default();
        settings.page.include_timestamp = false;
        let mut table = TableSpec::new(["Employee Name", "Skills"]);
        for i in 0..40 {
            table.push_row([format!("Employee {}", i), "Go: Expert".to_string()]);
        }

        let text = pdf_text(&render_pdf(&table, &settings).unwrap());
        assert!(text.contains("/Count 2"));
        // 續頁重複表頭
        assert_eq!(text.matches("(Employee Name) Tj").count(), 2);
        assert_eq!(text.matches("(Skill Matrix Report) Tj").count(), 1);
    }
}
