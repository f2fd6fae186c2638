//! A small paginated document model.
//!
//! [`Canvas`] holds pages and a cursor and knows how to draw cells.
//! [`PaginatedDocument`] wraps it with automatic page breaks and runs a
//! header and footer callback around every page.

use crate::render::fonts::{Font, FontStyle};
use crate::render::pdf;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub width: f64,
    pub height: f64,
    pub margin_left: f64,
    pub margin_top: f64,
    pub margin_right: f64,
    /// Distance from the bottom edge at which content triggers a new page.
    pub break_margin: f64,
}

impl PageLayout {
    /// A4 portrait in millimetres with 10mm side and top margins.
    pub fn a4(break_margin: f64) -> Self {
        Self {
            width: 210.0,
            height: 297.0,
            margin_left: 10.0,
            margin_top: 10.0,
            margin_right: 10.0,
            break_margin,
        }
    }

    pub fn break_trigger(&self) -> f64 {
        self.height - self.break_margin
    }

    /// Inner padding between a cell border and its text.
    pub fn cell_margin(&self) -> f64 {
        self.margin_left / 10.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// A single-line box of text, positioned at the cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    width: f64,
    height: f64,
    text: String,
    border: bool,
    align: Align,
    line_break: bool,
    word_spacing: f64,
}

impl Cell {
    /// A width of `0.0` extends the cell to the right margin.
    pub fn new(width: f64, height: f64, text: impl Into<String>) -> Self {
        Self {
            width,
            height,
            text: text.into(),
            border: false,
            align: Align::Left,
            line_break: false,
            word_spacing: 0.0,
        }
    }

    pub fn bordered(mut self) -> Self {
        self.border = true;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Move the cursor to the start of the next line after drawing.
    pub fn next_line(mut self) -> Self {
        self.line_break = true;
        self
    }

    fn word_spacing(mut self, spacing: f64) -> Self {
        self.word_spacing = spacing;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// `y` is the text baseline, in millimetres from the top edge.
    Text {
        x: f64,
        y: f64,
        font: Font,
        word_spacing: f64,
        text: String,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

pub struct Canvas {
    layout: PageLayout,
    pages: Vec<Page>,
    x: f64,
    y: f64,
    font: Font,
    last_height: f64,
}

impl Canvas {
    fn new(layout: PageLayout) -> Self {
        Self {
            layout,
            pages: Vec::new(),
            x: layout.margin_left,
            y: layout.margin_top,
            font: Font::new(FontStyle::Regular, 12.0),
            last_height: 0.0,
        }
    }

    fn begin_page(&mut self) {
        self.pages.push(Page::default());
        self.x = self.layout.margin_left;
        self.y = self.layout.margin_top;
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    /// One-based number of the current page, or 0 before the first page.
    pub fn page_no(&self) -> usize {
        self.pages.len()
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn font(&self) -> Font {
        self.font
    }

    pub fn set_font(&mut self, style: FontStyle, size: f64) {
        self.font = Font::new(style, size);
    }

    pub fn string_width(&self, text: &str) -> f64 {
        self.font.string_width(text)
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Moves to the left margin at `y`. Negative values count up from the bottom edge.
    pub fn set_y(&mut self, y: f64) {
        self.x = self.layout.margin_left;
        self.y = if y >= 0.0 { y } else { self.layout.height + y };
    }

    /// Line break. Without a height, advances by the height of the last cell.
    pub fn ln(&mut self, height: Option<f64>) {
        self.x = self.layout.margin_left;
        self.y += height.unwrap_or(self.last_height);
    }

    fn push(&mut self, op: DrawOp) {
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }

    /// Draws a cell at the cursor without any page-break check.
    pub fn draw_cell(&mut self, cell: &Cell) {
        let width = if cell.width == 0.0 {
            self.layout.width - self.layout.margin_right - self.x
        } else {
            cell.width
        };

        if cell.border {
            self.push(DrawOp::Rect {
                x: self.x,
                y: self.y,
                width,
                height: cell.height,
            });
        }

        if !cell.text.is_empty() {
            let margin = self.layout.cell_margin();
            let dx = match cell.align {
                Align::Left => margin,
                Align::Center => (width - self.string_width(&cell.text)) / 2.0,
            };
            let baseline = self.y + 0.5 * cell.height + 0.3 * self.font.size_mm();
            self.push(DrawOp::Text {
                x: self.x + dx,
                y: baseline,
                font: self.font,
                word_spacing: cell.word_spacing,
                text: cell.text.clone(),
            });
        }

        self.last_height = cell.height;
        if cell.line_break {
            self.x = self.layout.margin_left;
            self.y += cell.height;
        } else {
            self.x += width;
        }
    }
}

type Decoration<'a> = Box<dyn Fn(&mut Canvas) + 'a>;

/// A document that starts new pages on its own and decorates each page
/// with the supplied header and footer callbacks.
pub struct PaginatedDocument<'a> {
    canvas: Canvas,
    header: Decoration<'a>,
    footer: Decoration<'a>,
}

impl<'a> PaginatedDocument<'a> {
    pub fn new<H, F>(layout: PageLayout, header: H, footer: F) -> Self
    where
        H: Fn(&mut Canvas) + 'a,
        F: Fn(&mut Canvas) + 'a,
    {
        Self {
            canvas: Canvas::new(layout),
            header: Box::new(header),
            footer: Box::new(footer),
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn page_no(&self) -> usize {
        self.canvas.page_no()
    }

    /// Closes the current page with its footer and opens a new one with the header.
    /// The current font survives the decorations.
    pub fn add_page(&mut self) {
        let font = self.canvas.font();
        if self.canvas.page_no() > 0 {
            (self.footer)(&mut self.canvas);
        }
        self.canvas.begin_page();
        (self.header)(&mut self.canvas);
        self.canvas.font = font;
    }

    pub fn set_font(&mut self, style: FontStyle, size: f64) {
        self.canvas.set_font(style, size);
    }

    pub fn ln(&mut self, height: Option<f64>) {
        self.canvas.ln(height);
    }

    pub fn cell(&mut self, cell: Cell) {
        if self.canvas.page_no() == 0 {
            self.add_page();
        } else if self.canvas.y + cell.height > self.canvas.layout.break_trigger() {
            let x = self.canvas.x;
            self.add_page();
            self.canvas.x = x;
        }
        self.canvas.draw_cell(&cell);
    }

    /// Word-wraps `text` into lines of height `height`. All lines but the last
    /// of each paragraph are justified.
    pub fn multi_cell(&mut self, width: f64, height: f64, text: &str) {
        let layout = self.canvas.layout;
        let width = if width == 0.0 {
            layout.width - layout.margin_right - self.canvas.x
        } else {
            width
        };
        let max_text_width = width - 2.0 * layout.cell_margin();
        let font = self.canvas.font;

        for paragraph in text.split('\n') {
            let lines = wrap_words(paragraph, max_text_width, &font);
            let last = lines.len().saturating_sub(1);
            for (i, line) in lines.into_iter().enumerate() {
                let gaps = line.matches(' ').count();
                let spacing = if i < last && gaps > 0 {
                    (max_text_width - font.string_width(&line)) / gaps as f64
                } else {
                    0.0
                };
                self.cell(
                    Cell::new(width, height, line)
                        .word_spacing(spacing)
                        .next_line(),
                );
            }
        }
    }

    /// Runs the final footer and serializes the document as PDF.
    pub fn finish(mut self) -> Vec<u8> {
        if self.canvas.page_no() == 0 {
            self.add_page();
        }
        (self.footer)(&mut self.canvas);
        pdf::write_pdf(&self.canvas.layout, &self.canvas.pages)
    }
}

/// Greedy word wrap. Words wider than the line are split between characters.
fn wrap_words(paragraph: &str, max_width: f64, font: &Font) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in paragraph.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };

        if font.string_width(&candidate) <= max_width {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        for c in word.chars() {
            current.push(c);
            if font.string_width(&current) > max_width && current.chars().count() > 1 {
                current.pop();
                lines.push(std::mem::replace(&mut current, c.to_string()));
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
