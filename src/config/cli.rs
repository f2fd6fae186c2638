use crate::config::toml_config::ReportConfig;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "perf-report")]
#[command(about = "Generate an employee performance PDF report from a CSV file")]
pub struct CliArgs {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Input CSV file (overrides the config file)
    #[arg(long)]
    pub input: Option<String>,

    /// Output PDF file (overrides the config file)
    #[arg(long)]
    pub output: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Log memory and timing after each stage
    #[arg(long)]
    pub monitor: bool,

    /// Analyze the input and print statistics as JSON without writing a PDF
    #[arg(long)]
    pub dry_run: bool,
}

impl CliArgs {
    /// Applies command-line overrides on top of `config`.
    pub fn apply_overrides(&self, config: &mut ReportConfig) {
        if let Some(input) = &self.input {
            config.input.path = input.clone();
        }
        if let Some(output) = &self.output {
            config.output.path = output.clone();
        }
    }

    pub fn monitor_enabled(&self, config: &ReportConfig) -> bool {
        self.monitor || config.monitoring_enabled()
    }
}
