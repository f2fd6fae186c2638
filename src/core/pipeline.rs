use crate::core::loader::load_records;
use crate::core::statistics::{compute_aggregate, compute_group_averages};
use crate::domain::model::{Analysis, EmployeeRecord};
use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
use crate::render::report::{render_report, ReportContent};
use crate::utils::error::{ReportError, Result};
use chrono::NaiveDate;

/// Reads employee data through `storage` and produces the PDF report
/// described by `config`.
pub struct ReportPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> ReportPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    pub fn config(&self) -> &C {
        &self.config
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for ReportPipeline<S, C> {
    fn check_source(&self) -> Result<()> {
        let path = self.config.input_path();
        if !self.storage.exists(path) {
            return Err(ReportError::InputNotFound {
                path: path.to_string(),
            });
        }
        tracing::info!("{} found successfully.", path);
        Ok(())
    }

    fn load(&self) -> Result<Vec<EmployeeRecord>> {
        let path = self.config.input_path();
        let data = self.storage.read_file(path).map_err(|e| match e {
            ReportError::IoError(io) if io.kind() == std::io::ErrorKind::NotFound => {
                ReportError::InputNotFound {
                    path: path.to_string(),
                }
            }
            other => other,
        })?;
        tracing::debug!("Read {} bytes from {}", data.len(), path);
        load_records(&data)
    }

    fn analyze(&self, records: &[EmployeeRecord]) -> Result<Analysis> {
        let aggregate = compute_aggregate(records)?;
        let departments = compute_group_averages(records)?;
        Ok(Analysis {
            aggregate,
            departments,
        })
    }

    fn render(
        &self,
        records: &[EmployeeRecord],
        analysis: &Analysis,
        generated_on: NaiveDate,
    ) -> Result<Vec<u8>> {
        let content = ReportContent {
            title: self.config.report_title(),
            records,
            analysis,
            generated_on,
        };
        Ok(render_report(&content, self.config.page_margin()))
    }

    fn persist(&self, document: &[u8]) -> Result<String> {
        let path = self.config.output_path();
        self.storage.write_file(path, document)?;
        Ok(path.to_string())
    }
}
