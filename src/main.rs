use anyhow::Context;
use clap::Parser;
use perf_report::utils::{logger, validation::Validate};
use perf_report::{CliArgs, LocalStorage, ReportConfig, ReportEngine, ReportError, ReportPipeline};

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("Starting perf-report");

    // 載入配置
    let mut config = match &args.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            ReportConfig::from_file(path).unwrap_or_else(|e| fail(&e))
        }
        None => ReportConfig::default(),
    };
    args.apply_overrides(&mut config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        fail(&e);
    }
    tracing::debug!("Report config: {:?}", config);

    let monitor_enabled = args.monitor_enabled(&config);
    if monitor_enabled {
        tracing::info!("🔍 Stage monitoring enabled");
    }

    let pipeline = ReportPipeline::new(LocalStorage::current_dir(), config);
    let mut engine = ReportEngine::new_with_monitoring(pipeline, monitor_enabled);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no report will be written");
        let analysis = engine.analyze_only().unwrap_or_else(|e| fail(&e));
        let json = analysis
            .to_json()
            .context("failed to serialize analysis as JSON")?;
        println!("{}", json);
        return Ok(());
    }

    match engine.run() {
        Ok(summary) => {
            println!("PDF report generated successfully!");
            println!(
                "📁 Output saved to: {} ({} records, {} bytes)",
                summary.output_path, summary.records, summary.bytes_written
            );
            Ok(())
        }
        Err(e) => fail(&e),
    }
}

/// Prints the error for a person and exits with the code its severity calls for.
fn fail(e: &ReportError) -> ! {
    tracing::error!(
        "❌ Report generation failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}
