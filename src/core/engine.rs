use crate::domain::model::{Analysis, EmployeeRecord};
use crate::domain::ports::Pipeline;
use crate::utils::error::{ReportError, Result};
use crate::utils::monitor::StageMonitor;
use chrono::{Local, NaiveDate};
use std::fmt;

/// Where a run currently stands. Transitions only move forward; any error
/// moves the run to `Aborted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    Start,
    Validated,
    Loaded,
    Analyzed,
    Rendered,
    Persisted,
    Done,
    Aborted,
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunStage::Start => "start",
            RunStage::Validated => "validated",
            RunStage::Loaded => "loaded",
            RunStage::Analyzed => "analyzed",
            RunStage::Rendered => "rendered",
            RunStage::Persisted => "persisted",
            RunStage::Done => "done",
            RunStage::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub output_path: String,
    pub records: usize,
    pub bytes_written: usize,
    pub analysis: Analysis,
}

pub struct ReportEngine<P: Pipeline> {
    pipeline: P,
    stage: RunStage,
    monitor: StageMonitor,
    date_source: Box<dyn Fn() -> NaiveDate>,
}

impl<P: Pipeline> ReportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            stage: RunStage::Start,
            monitor: StageMonitor::new(monitor_enabled),
            date_source: Box::new(|| Local::now().date_naive()),
        }
    }

    /// Replaces the wall clock used for the report date.
    pub fn with_date_source(mut self, source: impl Fn() -> NaiveDate + 'static) -> Self {
        self.date_source = Box::new(source);
        self
    }

    pub fn stage(&self) -> RunStage {
        self.stage
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    fn advance(&mut self, next: RunStage) {
        tracing::debug!("Run stage: {} -> {}", self.stage, next);
        self.stage = next;
        self.monitor.log_stage(&next.to_string());
    }

    fn abort<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            tracing::error!("Report run aborted at stage '{}': {}", self.stage, e);
            self.stage = RunStage::Aborted;
        }
        result
    }

    /// Runs every stage through to a written report. The document is only
    /// written after rendering succeeds, so failed runs leave no output.
    pub fn run(&mut self) -> Result<RunSummary> {
        let result = self.run_stages();
        let result = self.abort(result);
        if result.is_ok() {
            self.advance(RunStage::Done);
            self.monitor.log_final_stats();
        }
        result
    }

    /// Runs up to analysis and returns the statistics without rendering.
    pub fn analyze_only(&mut self) -> Result<Analysis> {
        let result = self.analyze_stages().map(|(_, analysis)| analysis);
        self.abort(result)
    }

    fn analyze_stages(&mut self) -> Result<(Vec<EmployeeRecord>, Analysis)> {
        self.expect_stage(RunStage::Start)?;

        self.pipeline.check_source()?;
        self.advance(RunStage::Validated);

        let records = self.pipeline.load()?;
        self.advance(RunStage::Loaded);

        let analysis = self.pipeline.analyze(&records)?;
        self.advance(RunStage::Analyzed);

        Ok((records, analysis))
    }

    fn run_stages(&mut self) -> Result<RunSummary> {
        let (records, analysis) = self.analyze_stages()?;

        let generated_on = (self.date_source)();
        let document = self.pipeline.render(&records, &analysis, generated_on)?;
        self.advance(RunStage::Rendered);

        let output_path = self.pipeline.persist(&document)?;
        self.advance(RunStage::Persisted);
        tracing::info!("PDF report generated successfully: {}", output_path);

        Ok(RunSummary {
            output_path,
            records: records.len(),
            bytes_written: document.len(),
            analysis,
        })
    }

    fn expect_stage(&self, expected: RunStage) -> Result<()> {
        if self.stage != expected {
            return Err(ReportError::InvalidRunState {
                expected: expected.to_string(),
                actual: self.stage.to_string(),
            });
        }
        Ok(())
    }
}
