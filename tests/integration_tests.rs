use chrono::NaiveDate;
use perf_report::{LocalStorage, ReportConfig, ReportEngine, ReportError, ReportPipeline, RunStage};
use std::path::Path;
use tempfile::TempDir;

const SAMPLE_CSV: &str = "\
Name,Department,Score
Alice Johnson,Engineering,88
Bob Smith,Marketing,75
Carol White,Engineering,92
David Brown,Sales,67
Eve Davis,Marketing,81
";

fn write_input(dir: &Path, contents: &str) -> String {
    let path = dir.join("data.csv");
    std::fs::write(&path, contents).unwrap();
    path.to_str().unwrap().to_string()
}

fn engine_for(
    dir: &TempDir,
    input: String,
    date: NaiveDate,
) -> (ReportEngine<ReportPipeline<LocalStorage, ReportConfig>>, String) {
    let output = dir
        .path()
        .join("out/employee_performance_report.pdf")
        .to_str()
        .unwrap()
        .to_string();
    let config = ReportConfig::new(input, output.clone());
    let pipeline = ReportPipeline::new(LocalStorage::current_dir(), config);
    let engine = ReportEngine::new(pipeline).with_date_source(move || date);
    (engine, output)
}

fn find(haystack: &[u8], needle: &str) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|w| w == needle.as_bytes())
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 9).unwrap()
}

#[test]
fn test_end_to_end_report_generation() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(temp_dir.path(), SAMPLE_CSV);
    let (mut engine, output) = engine_for(&temp_dir, input, date());

    let summary = engine.run().unwrap();

    assert_eq!(engine.stage(), RunStage::Done);
    assert_eq!(summary.output_path, output);
    assert_eq!(summary.records, 5);
    assert_eq!(summary.analysis.aggregate.total_count, 5);
    assert_eq!(summary.analysis.aggregate.average, 80.6);
    assert_eq!(summary.analysis.aggregate.max, 92);
    assert_eq!(summary.analysis.aggregate.min, 67);
    assert_eq!(summary.analysis.departments.get("Engineering"), Some(90.0));
    assert_eq!(summary.analysis.departments.get("Marketing"), Some(78.0));
    assert_eq!(summary.analysis.departments.get("Sales"), Some(67.0));

    let pdf = std::fs::read(&output).unwrap();
    assert_eq!(pdf.len(), summary.bytes_written);
    assert!(pdf.starts_with(b"%PDF-1.4"));
    assert!(pdf.ends_with(b"%%EOF\n"));

    for expected in [
        "(Report Generated On: January 09, 2025) Tj",
        "(Total Employees: 5) Tj",
        "(Average Score: 80.6) Tj",
        "(Highest Score: 92) Tj",
        "(Lowest Score: 67) Tj",
        "(Engineering: Average Score = 90.0) Tj",
        "(Marketing: Average Score = 78.0) Tj",
        "(Sales: Average Score = 67.0) Tj",
        "(Page 1) Tj",
    ] {
        assert!(find(&pdf, expected).is_some(), "missing {}", expected);
    }

    let order: Vec<usize> = ["Alice Johnson", "Bob Smith", "Carol White", "David Brown", "Eve Davis"]
        .iter()
        .map(|name| find(&pdf, &format!("({}) Tj", name)).unwrap())
        .collect();
    assert!(order.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_missing_input_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope.csv").to_str().unwrap().to_string();
    let (mut engine, output) = engine_for(&temp_dir, missing.clone(), date());

    let err = engine.run().unwrap_err();

    assert!(matches!(err, ReportError::InputNotFound { ref path } if *path == missing));
    assert_eq!(engine.stage(), RunStage::Aborted);
    assert!(!Path::new(&output).exists());
}

#[test]
fn test_missing_score_column_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(temp_dir.path(), "Name,Department\nAlice,Sales\n");
    let (mut engine, output) = engine_for(&temp_dir, input, date());

    let err = engine.run().unwrap_err();

    assert!(matches!(err, ReportError::MalformedRecord { .. }));
    assert!(!Path::new(&output).exists());
}

#[test]
fn test_non_numeric_score_aborts_whole_run() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(
        temp_dir.path(),
        "Name,Department,Score\nAlice,Sales,80\nBob,Sales,N/A\n",
    );
    let (mut engine, output) = engine_for(&temp_dir, input, date());

    let err = engine.run().unwrap_err();

    assert!(matches!(err, ReportError::MalformedRecord { line: 3, .. }));
    assert!(!Path::new(&output).exists());
}

#[test]
fn test_header_only_input_is_empty_dataset() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(temp_dir.path(), "Name,Department,Score\n");
    let (mut engine, output) = engine_for(&temp_dir, input, date());

    let err = engine.run().unwrap_err();

    assert!(matches!(err, ReportError::EmptyDataset));
    assert_eq!(err.exit_code(), 1);
    assert!(!Path::new(&output).exists());
}

#[test]
fn test_rerun_produces_identical_bytes() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(temp_dir.path(), SAMPLE_CSV);

    let (mut first, output) = engine_for(&temp_dir, input.clone(), date());
    first.run().unwrap();
    let first_bytes = std::fs::read(&output).unwrap();

    let (mut second, _) = engine_for(&temp_dir, input, date());
    second.run().unwrap();
    let second_bytes = std::fs::read(&output).unwrap();

    assert_eq!(first_bytes, second_bytes);
}

#[test]
fn test_dry_run_analysis_serializes_reference_fields() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(
        temp_dir.path(),
        "Name,Department,Score\nA,A,80\nB,A,90\nC,B,70\n",
    );
    let (mut engine, output) = engine_for(&temp_dir, input, date());

    let analysis = engine.analyze_only().unwrap();
    let json = serde_json::to_value(&analysis).unwrap();

    assert_eq!(
        json["aggregate"],
        serde_json::json!({
            "total_employees": 3,
            "average_score": 80.0,
            "highest_score": 90,
            "lowest_score": 70
        })
    );
    assert_eq!(
        json["departments"],
        serde_json::json!([
            {"department": "A", "average": 85.0},
            {"department": "B", "average": 70.0}
        ])
    );
    assert_eq!(engine.stage(), RunStage::Analyzed);
    assert!(!Path::new(&output).exists());
}

#[test]
fn test_config_file_drives_run() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(temp_dir.path(), SAMPLE_CSV);
    let output = temp_dir.path().join("custom.pdf");
    let config_path = temp_dir.path().join("report.toml");
    std::fs::write(
        &config_path,
        format!(
            "[input]\npath = {:?}\n\n[output]\npath = {:?}\n\n[layout]\ntitle = \"Q1 Review\"\npage_margin = 20.0\n",
            input,
            output.to_str().unwrap()
        ),
    )
    .unwrap();

    let config = ReportConfig::from_file(&config_path).unwrap();
    let pipeline = ReportPipeline::new(LocalStorage::current_dir(), config);
    let mut engine = ReportEngine::new(pipeline).with_date_source(date);

    engine.run().unwrap();

    let pdf = std::fs::read(&output).unwrap();
    assert!(find(&pdf, "(Q1 Review) Tj").is_some());
}

#[test]
fn test_page_margin_moves_page_breaks() {
    let rows: String = (0..60)
        .map(|i| format!("Employee {},Sales,{}\n", i, 60 + i % 40))
        .collect();
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(temp_dir.path(), &format!("Name,Department,Score\n{}", rows));

    let page_count = |margin: f64, file: &str| {
        let output = temp_dir.path().join(file);
        let mut config = ReportConfig::new(input.clone(), output.to_str().unwrap());
        config.layout.page_margin = margin;
        let pipeline = ReportPipeline::new(LocalStorage::current_dir(), config);
        ReportEngine::new(pipeline).with_date_source(date).run().unwrap();

        let pdf = std::fs::read(&output).unwrap();
        (1..=20)
            .filter(|n| find(&pdf, &format!("(Page {}) Tj", n)).is_some())
            .count()
    };

    let default_pages = page_count(15.0, "default.pdf");
    let wide_pages = page_count(100.0, "wide.pdf");

    assert_eq!(default_pages, 3);
    assert_eq!(wide_pages, 5);
}
