use crate::domain::ports::ConfigProvider;
use crate::render::report::DEFAULT_TITLE;
use crate::utils::error::{ReportError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_INPUT_PATH: &str = "data.csv";
pub const DEFAULT_OUTPUT_PATH: &str = "employee_performance_report.pdf";
pub const DEFAULT_PAGE_MARGIN: f64 = 15.0;
pub const MAX_PAGE_MARGIN: f64 = 100.0;

/// Settings for one report run. Every section is optional in the TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub layout: LayoutConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub path: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_INPUT_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_OUTPUT_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Bottom margin in millimetres that triggers a page break.
    pub page_margin: f64,
    pub title: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_margin: DEFAULT_PAGE_MARGIN,
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl ReportConfig {
    pub fn new(input_path: impl Into<String>, output_path: impl Into<String>) -> Self {
        Self {
            input: InputConfig {
                path: input_path.into(),
            },
            output: OutputConfig {
                path: output_path.into(),
            },
            ..Self::default()
        }
    }

    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ReportError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ReportError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("input.path", &self.input.path)?;
        validation::validate_path("output.path", &self.output.path)?;
        validation::validate_distinct_paths("output.path", &self.input.path, &self.output.path)?;
        validation::validate_range(
            "layout.page_margin",
            self.layout.page_margin,
            0.0,
            MAX_PAGE_MARGIN,
        )?;
        validation::validate_non_empty_string("layout.title", &self.layout.title)?;
        Ok(())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for ReportConfig {
    fn input_path(&self) -> &str {
        &self.input.path
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn page_margin(&self) -> f64 {
        self.layout.page_margin
    }

    fn report_title(&self) -> &str {
        &self.layout.title
    }
}

impl Validate for ReportConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = ReportConfig::default();

        assert_eq!(config.input_path(), "data.csv");
        assert_eq!(config.output_path(), "employee_performance_report.pdf");
        assert_eq!(config.page_margin(), 15.0);
        assert_eq!(config.report_title(), "Employee Performance Analysis Report");
        assert!(!config.monitoring_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_toml_config() {
        let toml_content = r#"
[input]
path = "staff/q3.csv"

[layout]
page_margin = 20.0
"#;

        let config = ReportConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.input_path(), "staff/q3.csv");
        assert_eq!(config.output_path(), DEFAULT_OUTPUT_PATH);
        assert_eq!(config.page_margin(), 20.0);
        assert_eq!(config.report_title(), DEFAULT_TITLE);
    }

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[input]
path = "in.csv"

[output]
path = "out/report.pdf"

[layout]
page_margin = 12.5
title = "Quarterly Review"

[monitoring]
enabled = true
"#;

        let config = ReportConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.output_path(), "out/report.pdf");
        assert_eq!(config.report_title(), "Quarterly Review");
        assert!(config.monitoring_enabled());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = ReportConfig::from_toml_str("[layout]\npage_margin = \"wide\"\n").unwrap_err();
        assert!(matches!(err, ReportError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_validation() {
        let mut config = ReportConfig::new("data.csv", "data.csv");
        assert!(config.validate().is_err());

        config.output.path = "report.pdf".to_string();
        assert!(config.validate().is_ok());

        config.layout.page_margin = 150.0;
        assert!(config.validate().is_err());

        config.layout.page_margin = 15.0;
        config.layout.title = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[output]\npath = \"file-test.pdf\"\n")
            .unwrap();

        let config = ReportConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.output_path(), "file-test.pdf");
    }
}
