use crate::domain::model::{Analysis, EmployeeRecord};
use crate::utils::error::Result;
use chrono::NaiveDate;

pub trait Storage {
    fn exists(&self, path: &str) -> bool;
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn page_margin(&self) -> f64;
    fn report_title(&self) -> &str;
}

/// The stages of a single report run, called in order by `ReportEngine`.
pub trait Pipeline {
    fn check_source(&self) -> Result<()>;
    fn load(&self) -> Result<Vec<EmployeeRecord>>;
    fn analyze(&self, records: &[EmployeeRecord]) -> Result<Analysis>;
    fn render(
        &self,
        records: &[EmployeeRecord],
        analysis: &Analysis,
        generated_on: NaiveDate,
    ) -> Result<Vec<u8>>;
    fn persist(&self, document: &[u8]) -> Result<String>;
}
