//! Serializes laid-out pages as a PDF 1.4 file.
//!
//! Output is uncompressed and carries no timestamps or document IDs, so the
//! same pages always produce the same bytes.

use crate::render::document::{DrawOp, Page, PageLayout};
use crate::render::fonts::{encode_win_ansi, FontStyle, PT_PER_MM};
use std::fmt::Write as _;

const CATALOG_ID: usize = 1;
const PAGES_ID: usize = 2;
const FONTS: [(usize, FontStyle); 2] = [(3, FontStyle::Regular), (4, FontStyle::Bold)];
const FIRST_PAGE_ID: usize = 5;

/// Line width for cell borders, 0.2mm.
const LINE_WIDTH_PT: f64 = 0.567;

struct PdfWriter {
    buf: Vec<u8>,
    offsets: Vec<usize>,
}

impl PdfWriter {
    fn new() -> Self {
        let mut buf = Vec::new();
        buf.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");
        Self {
            buf,
            offsets: Vec::new(),
        }
    }

    fn object(&mut self, id: usize, body: &[u8]) {
        debug_assert_eq!(id, self.offsets.len() + 1, "objects must be written in id order");
        self.offsets.push(self.buf.len());
        self.buf.extend_from_slice(format!("{} 0 obj\n", id).as_bytes());
        self.buf.extend_from_slice(body);
        self.buf.extend_from_slice(b"\nendobj\n");
    }

    fn stream(&mut self, id: usize, content: &[u8]) {
        let mut body = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
        body.extend_from_slice(content);
        body.extend_from_slice(b"\nendstream");
        self.object(id, &body);
    }

    fn finish(mut self) -> Vec<u8> {
        let xref_offset = self.buf.len();
        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", self.offsets.len() + 1);
        for offset in &self.offsets {
            let _ = writeln!(xref, "{:010} 00000 n ", offset);
        }
        let _ = write!(
            xref,
            "trailer\n<< /Size {} /Root {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            self.offsets.len() + 1,
            CATALOG_ID,
            xref_offset
        );
        self.buf.extend_from_slice(xref.as_bytes());
        self.buf
    }
}

pub fn write_pdf(layout: &PageLayout, pages: &[Page]) -> Vec<u8> {
    let mut writer = PdfWriter::new();
    let page_id = |index: usize| FIRST_PAGE_ID + 2 * index;

    writer.object(
        CATALOG_ID,
        format!("<< /Type /Catalog /Pages {} 0 R >>", PAGES_ID).as_bytes(),
    );

    let kids: Vec<String> = (0..pages.len())
        .map(|i| format!("{} 0 R", page_id(i)))
        .collect();
    writer.object(
        PAGES_ID,
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} /MediaBox [0 0 {:.2} {:.2}] >>",
            kids.join(" "),
            pages.len(),
            layout.width * PT_PER_MM,
            layout.height * PT_PER_MM
        )
        .as_bytes(),
    );

    for (id, style) in FONTS {
        writer.object(
            id,
            format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                style.base_font()
            )
            .as_bytes(),
        );
    }

    let font_resources: Vec<String> = FONTS
        .iter()
        .map(|(id, style)| format!("/{} {} 0 R", style.resource_name(), id))
        .collect();

    for (index, page) in pages.iter().enumerate() {
        let id = page_id(index);
        writer.object(
            id,
            format!(
                "<< /Type /Page /Parent {} 0 R /Resources << /Font << {} >> >> /Contents {} 0 R >>",
                PAGES_ID,
                font_resources.join(" "),
                id + 1
            )
            .as_bytes(),
        );
        writer.stream(id + 1, &content_stream(layout, page));
    }

    writer.finish()
}

fn content_stream(layout: &PageLayout, page: &Page) -> Vec<u8> {
    let mut out = format!("{:.3} w\n", LINE_WIDTH_PT).into_bytes();
    let to_pdf_y = |y: f64| (layout.height - y) * PT_PER_MM;

    for op in &page.ops {
        match op {
            DrawOp::Rect {
                x,
                y,
                width,
                height,
            } => {
                out.extend_from_slice(
                    format!(
                        "{:.2} {:.2} {:.2} {:.2} re S\n",
                        x * PT_PER_MM,
                        to_pdf_y(*y),
                        width * PT_PER_MM,
                        -height * PT_PER_MM
                    )
                    .as_bytes(),
                );
            }
            DrawOp::Text {
                x,
                y,
                font,
                word_spacing,
                text,
            } => {
                let mut line = format!(
                    "BT /{} {:.2} Tf {:.2} {:.2} Td ",
                    font.style.resource_name(),
                    font.size,
                    x * PT_PER_MM,
                    to_pdf_y(*y)
                );
                if *word_spacing != 0.0 {
                    let _ = write!(line, "{:.3} Tw ", word_spacing * PT_PER_MM);
                }
                out.extend_from_slice(line.as_bytes());
                out.push(b'(');
                out.extend_from_slice(&escape_string(&encode_win_ansi(text)));
                out.extend_from_slice(b") Tj");
                if *word_spacing != 0.0 {
                    out.extend_from_slice(b" 0 Tw");
                }
                out.extend_from_slice(b" ET\n");
            }
        }
    }

    out
}

fn escape_string(bytes: &[u8]) -> Vec<u8> {
    let mut escaped = Vec::with_capacity(bytes.len());
    for &b in bytes {
        match b {
            b'(' | b')' | b'\\' => {
                escaped.push(b'\\');
                escaped.push(b);
            }
            b'\r' => escaped.extend_from_slice(b"\\r"),
            _ => escaped.push(b),
        }
    }
    escaped
}
