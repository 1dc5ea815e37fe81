use crate::core::pdf::layout::CellBox;
use crate::core::pdf::metrics::{encode_win_ansi, HELVETICA_ASCENT};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use std::io::Write;

const FONT_RESOURCE: &str = "F1";

/// Content stream for one page. Callers work in top-down coordinates; the
/// canvas flips y into PDF user space.
#[derive(Debug, Clone)]
pub struct PageCanvas {
    height: f64,
    ops: Vec<u8>,
}

impl PageCanvas {
    pub fn new(height: f64) -> Self {
        Self {
            height,
            ops: Vec::new(),
        }
    }

    pub fn stroke_rect(&mut self, bounds: &CellBox) -> Result<()> {
        let bottom = self.height - bounds.y - bounds.height;
        writeln!(
            self.ops,
            "{:.2} {:.2} {:.2} {:.2} re S",
            bounds.x, bottom, bounds.width, bounds.height
        )?;
        Ok(())
    }

    /// Draws `text` with its top edge at `top`.
    pub fn text(&mut self, font_size: f64, x: f64, top: f64, text: &str) -> Result<()> {
        let baseline = self.height - top - HELVETICA_ASCENT * font_size;
        writeln!(self.ops, "BT")?;
        writeln!(self.ops, "/{} {:.2} Tf", FONT_RESOURCE, font_size)?;
        writeln!(self.ops, "{:.2} {:.2} Td", x, baseline)?;
        self.ops.push(b'(');
        self.ops.extend(escape_pdf_string(&encode_win_ansi(text)));
        self.ops.extend_from_slice(b") Tj\n");
        writeln!(self.ops, "ET")?;
        Ok(())
    }

    pub fn content(&self) -> &[u8] {
        &self.ops
    }
}

#[derive(Debug, Clone)]
pub struct DocumentInfo {
    pub title: String,
    pub producer: String,
    pub created_at: Option<DateTime<Utc>>,
}

fn escape_pdf_string(bytes: &[u8]) -> Vec<u8> {
    let mut escaped = Vec::with_capacity(bytes.len());
    for &byte in bytes {
        if matches!(byte, b'\\' | b'(' | b')') {
            escaped.push(b'\\');
        }
        escaped.push(byte);
    }
    escaped
}

/// Assembles a PDF 1.4 file: catalog, page tree, one Helvetica font, info
/// dictionary, then one page object and content stream per canvas.
pub fn write_pdf(pages: &[PageCanvas], page_size: (f64, f64), info: &DocumentInfo) -> Result<Vec<u8>> {
    let (width, height) = page_size;
    let mut pdf: Vec<u8> = Vec::new();
    let mut offsets: Vec<usize> = Vec::new();

    pdf.extend_from_slice(b"%PDF-1.4\n");
    pdf.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");

    // 物件編號：1 catalog、2 pages、3 font、4 info，之後每頁兩個物件（page + content）
    let page_ids: Vec<usize> = (0..pages.len()).map(|i| 5 + i * 2).collect();

    offsets.push(pdf.len());
    write!(pdf, "1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n")?;

    offsets.push(pdf.len());
    let kids: Vec<String> = page_ids.iter().map(|id| format!("{} 0 R", id)).collect();
    write!(
        pdf,
        "2 0 obj\n<< /Type /Pages /Kids [{}] /Count {} >>\nendobj\n",
        kids.join(" "),
        pages.len()
    )?;

    offsets.push(pdf.len());
    write!(
        pdf,
        "3 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>\nendobj\n"
    )?;

    offsets.push(pdf.len());
    pdf.extend_from_slice(b"4 0 obj\n<< /Title (");
    pdf.extend(escape_pdf_string(&encode_win_ansi(&info.title)));
    pdf.extend_from_slice(b") /Producer (");
    pdf.extend(escape_pdf_string(&encode_win_ansi(&info.producer)));
    pdf.push(b')');
    if let Some(created_at) = info.created_at {
        write!(pdf, " /CreationDate (D:{}Z)", created_at.format("%Y%m%d%H%M%S"))?;
    }
    pdf.extend_from_slice(b" >>\nendobj\n");

    for (page, page_id) in pages.iter().zip(&page_ids) {
        let content_id = page_id + 1;

        offsets.push(pdf.len());
        write!(
            pdf,
            "{} 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] /Contents {} 0 R /Resources << /Font << /{} 3 0 R >> >> >>\nendobj\n",
            page_id, width, height, content_id, FONT_RESOURCE
        )?;

        offsets.push(pdf.len());
        let content = page.content();
        write!(pdf, "{} 0 obj\n<< /Length {} >>\nstream\n", content_id, content.len())?;
        pdf.extend_from_slice(content);
        pdf.extend_from_slice(b"\nendstream\nendobj\n");
    }

    let xref_start = pdf.len();
    write!(pdf, "xref\n0 {}\n", offsets.len() + 1)?;
    pdf.extend_from_slice(b"0000000000 65535 f \n");
    for offset in &offsets {
        write!(pdf, "{:010} 00000 n \n", offset)?;
    }

    write!(
        pdf,
        "trailer\n<< /Size {} /Root 1 0 R /Info 4 0 R >>\nstartxref\n{}\n%%EOF\n",
        offsets.len() + 1,
        xref_start
    )?;

    Ok(pdf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> DocumentInfo {
        DocumentInfo {
            title: "Skill Matrix Report".to_string(),
            producer: "skill-matrix".to_string(),
            created_at: None,
        }
    }

    #[test]
    fn test_escape_pdf_string() {
        assert_eq!(escape_pdf_string(b"a(b)c\\"), b"a\\(b\\)c\\\\".to_vec());
    }

    #[test]
    fn test_canvas_flips_coordinates() {
        let mut canvas = PageCanvas::new(792.0);
        canvas
            .stroke_rect(&CellBox {
                x: 72.0,
                y: 100.0,
                width: 140.0,
                height: 20.0,
            })
            .unwrap();
        let ops = String::from_utf8(canvas.content().to_vec()).unwrap();
        assert_eq!(ops, "72.00 672.00 140.00 20.00 re S\n");
    }

    #[test]
    fn test_text_uses_baseline() {
        let mut canvas = PageCanvas::new(792.0);
        canvas.text(10.0, 82.0, 105.0, "Ann (Lead)").unwrap();
        let ops = String::from_utf8(canvas.content().to_vec()).unwrap();
        // 792 - 105 - 7.18
        assert!(ops.contains("82.00 679.82 Td"));
        assert!(ops.contains("(Ann \\(Lead\\)) Tj"));
    }

    #[test]
    fn test_document_structure() {
        let mut first = PageCanvas::new(792.0);
        first.text(12.0, 72.0, 72.0, "Hello").unwrap();
        let second = PageCanvas::new(792.0);

        let pdf = write_pdf(&[first, second], (612.0, 792.0), &info()).unwrap();
        let text = String::from_utf8_lossy(&pdf);

        assert!(pdf.starts_with(b"%PDF-1.4"));
        assert!(text.contains("/Kids [5 0 R 7 0 R] /Count 2"));
        assert!(text.contains("/BaseFont /Helvetica"));
        assert!(text.contains("/Title (Skill Matrix Report)"));
        assert!(!text.contains("/CreationDate"));
        assert!(text.trim_end().ends_with("%%EOF"));
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let pdf = write_pdf(&[PageCanvas::new(792.0)], (612.0, 792.0), &info()).unwrap();

        let xref = pdf
            .windows(5)
            .position(|window| window == b"xref\n")
            .unwrap();
        let table = std::str::from_utf8(&pdf[xref..]).unwrap();
        let entries: Vec<usize> = table
            .lines()
            .skip(3)
            .take_while(|line| line.ends_with(" n "))
            .map(|line| line[..10].parse().unwrap())
            .collect();
        assert_eq!(entries.len(), 6);
        for (index, offset) in entries.iter().enumerate() {
            let expected = format!("{} 0 obj", index + 1);
            assert!(pdf[*offset..].starts_with(expected.as_bytes()));
        }
    }
}
