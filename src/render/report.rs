use crate::core::statistics::format_score;
use crate::domain::model::{AggregateStatistics, Analysis, DepartmentAverages, EmployeeRecord};
use crate::render::document::{Align, Canvas, Cell, PageLayout, PaginatedDocument};
use crate::render::fonts::FontStyle;
use chrono::NaiveDate;

pub const DEFAULT_TITLE: &str = "Employee Performance Analysis Report";

const TABLE_COLUMNS: [(&str, f64); 3] = [("Name", 60.0), ("Department", 60.0), ("Score", 30.0)];
const BODY_SIZE: f64 = 11.0;
const HEADING_SIZE: f64 = 12.0;
const LINE_HEIGHT: f64 = 8.0;
const HEADING_HEIGHT: f64 = 10.0;
const SECTION_GAP: f64 = 5.0;

/// Everything that ends up on the page.
pub struct ReportContent<'a> {
    pub title: &'a str,
    pub records: &'a [EmployeeRecord],
    pub analysis: &'a Analysis,
    pub generated_on: NaiveDate,
}

pub fn format_report_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

pub fn render_report(content: &ReportContent<'_>, break_margin: f64) -> Vec<u8> {
    let title = content.title;
    let header = move |canvas: &mut Canvas| {
        canvas.set_font(FontStyle::Bold, 14.0);
        canvas.draw_cell(&Cell::new(0.0, 10.0, title).align(Align::Center));
        canvas.ln(Some(15.0));
    };
    let footer = |canvas: &mut Canvas| {
        canvas.set_y(-15.0);
        canvas.set_font(FontStyle::Regular, 9.0);
        let label = format!("Page {}", canvas.page_no());
        canvas.draw_cell(&Cell::new(0.0, 10.0, label).align(Align::Center));
    };

    let mut doc = PaginatedDocument::new(PageLayout::a4(break_margin), header, footer);
    doc.add_page();

    add_metadata(&mut doc, content.generated_on);
    add_summary_section(&mut doc, &content.analysis.aggregate);
    add_department_analysis(&mut doc, &content.analysis.departments);
    add_employee_table(&mut doc, content.records);
    add_conclusion(&mut doc, &content.analysis.aggregate);

    let pages = doc.page_no();
    let bytes = doc.finish();
    tracing::debug!("Rendered report: {} pages, {} bytes", pages, bytes.len());
    bytes
}

fn heading(doc: &mut PaginatedDocument<'_>, text: &str) {
    doc.set_font(FontStyle::Bold, HEADING_SIZE);
    doc.cell(Cell::new(0.0, HEADING_HEIGHT, text).next_line());
    doc.set_font(FontStyle::Regular, BODY_SIZE);
}

fn line(doc: &mut PaginatedDocument<'_>, text: String) {
    doc.cell(Cell::new(0.0, LINE_HEIGHT, text).next_line());
}

fn add_metadata(doc: &mut PaginatedDocument<'_>, generated_on: NaiveDate) {
    doc.set_font(FontStyle::Regular, BODY_SIZE);
    line(
        doc,
        format!("Report Generated On: {}", format_report_date(generated_on)),
    );
    doc.ln(Some(SECTION_GAP));
}

fn add_summary_section(doc: &mut PaginatedDocument<'_>, stats: &AggregateStatistics) {
    heading(doc, "1. Summary Statistics");
    line(doc, format!("Total Employees: {}", stats.total_count));
    line(doc, format!("Average Score: {}", format_score(stats.average)));
    line(doc, format!("Highest Score: {}", stats.max));
    line(doc, format!("Lowest Score: {}", stats.min));
    doc.ln(Some(SECTION_GAP));
}

fn add_department_analysis(doc: &mut PaginatedDocument<'_>, departments: &DepartmentAverages) {
    heading(doc, "2. Department-wise Performance");
    for entry in departments.iter() {
        line(
            doc,
            format!(
                "{}: Average Score = {}",
                entry.department,
                format_score(entry.average)
            ),
        );
    }
    doc.ln(Some(SECTION_GAP));
}

fn add_employee_table(doc: &mut PaginatedDocument<'_>, records: &[EmployeeRecord]) {
    heading(doc, "3. Employee-wise Detailed Scores");

    doc.set_font(FontStyle::Bold, BODY_SIZE);
    for (label, width) in TABLE_COLUMNS {
        doc.cell(Cell::new(width, 10.0, label).bordered().align(Align::Center));
    }
    doc.ln(None);

    doc.set_font(FontStyle::Regular, BODY_SIZE);
    let [(_, name_w), (_, dept_w), (_, score_w)] = TABLE_COLUMNS;
    for record in records {
        doc.cell(Cell::new(name_w, 10.0, record.name.as_str()).bordered());
        doc.cell(Cell::new(dept_w, 10.0, record.department.as_str()).bordered());
        doc.cell(
            Cell::new(score_w, 10.0, record.score.to_string())
                .bordered()
                .align(Align::Center),
        );
        doc.ln(None);
    }

    doc.ln(Some(SECTION_GAP));
}

fn add_conclusion(doc: &mut PaginatedDocument<'_>, stats: &AggregateStatistics) {
    heading(doc, "4. Conclusion");
    doc.multi_cell(
        0.0,
        LINE_HEIGHT,
        &format!(
            "The overall average performance score of employees is {}. \
             Continuous monitoring and targeted improvements can help \
             increase overall productivity.",
            format_score(stats.average)
        ),
    );
}
