pub mod document;
pub mod fonts;
pub mod pdf;
pub mod report;

pub use document::{Align, Canvas, Cell, PageLayout, PaginatedDocument};
pub use report::{render_report, ReportContent};
