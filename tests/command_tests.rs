use placement_stats::aggregator::CollegeSort;
use placement_stats::commands::{
    execute_export, execute_import, execute_report, run_report, validate_records_file, ExportArgs,
    FilterArgs, ImportArgs, RenderedReport, ReportArgs, ReportView,
};
use placement_stats::output::write_records;
use placement_stats::record::{CompanyPlacement, JsonFileSource, PlacementRecord, RecordSource};
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture(dir: &TempDir) -> PathBuf {
    let records = vec![
        PlacementRecord::new("1", "IIT Delhi", "Computer Science", 2024)
            .with_counts(100, 95)
            .with_packages(25.0, 80.0)
            .with_company(CompanyPlacement::new("Google", 10, 45.0).with_tags("Tier 1", "Technology")),
        PlacementRecord::new("2", "NIT Trichy", "Computer Science", 2024)
            .with_counts(100, 80)
            .with_packages(12.0, 40.0)
            .with_company(CompanyPlacement::new("TCS", 30, 4.0).with_tags("Tier 3", "Technology")),
        PlacementRecord::new("1", "IIT Delhi", "Computer Science", 2023)
            .with_counts(100, 90)
            .with_packages(22.0, 70.0),
    ];
    let path = dir.path().join("records.json");
    write_records(&records, &path).unwrap();
    path
}

fn json_data(args: &ReportArgs) -> serde_json::Value {
    match run_report(args).unwrap() {
        RenderedReport::Json(report) => {
            assert_eq!(report.view, args.view.name());
            report.data
        }
        RenderedReport::Text(text) => panic!("expected JSON, got text:\n{}", text),
    }
}

fn report_args(input: &Path, view: ReportView) -> ReportArgs {
    ReportArgs {
        input: input.to_path_buf(),
        view,
        ..Default::default()
    }
}

#[test]
fn test_summary_defaults_to_latest_year() {
    let dir = tempfile::tempdir().unwrap();
    let input = fixture(&dir);

    let data = json_data(&report_args(&input, ReportView::Summary));
    assert_eq!(data["recordCount"], 2);
    assert_eq!(data["totalOffers"], 175);
}

#[test]
fn test_explicit_year_overrides_default() {
    let dir = tempfile::tempdir().unwrap();
    let input = fixture(&dir);

    let mut args = report_args(&input, ReportView::Branches);
    args.filter = FilterArgs {
        year: Some(2023),
        ..Default::default()
    };
    let data = json_data(&args);
    assert_eq!(data[0]["placedStudents"], 90);
}

#[test]
fn test_trend_spans_all_years() {
    let dir = tempfile::tempdir().unwrap();
    let input = fixture(&dir);

    let mut args = report_args(&input, ReportView::Trend { years: vec![] });
    args.filter.college_id = Some("1".to_string());
    let data = json_data(&args);

    let years: Vec<i64> = data
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["year"].as_i64().unwrap())
        .collect();
    assert_eq!(years, vec![2023, 2024]);
}

#[test]
fn test_colleges_and_recruiters() {
    let dir = tempfile::tempdir().unwrap();
    let input = fixture(&dir);

    let colleges = json_data(&report_args(
        &input,
        ReportView::Colleges {
            sort: CollegeSort::PlacementRate,
            limit: None,
        },
    ));
    assert_eq!(colleges[0]["collegeName"], "IIT Delhi");
    assert_eq!(colleges[1]["collegeName"], "NIT Trichy");

    let recruiters = json_data(&report_args(&input, ReportView::Recruiters { limit: Some(1) }));
    assert_eq!(recruiters.as_array().unwrap().len(), 1);
    assert_eq!(recruiters[0]["company"], "TCS");
}

#[test]
fn test_config_file_supplies_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let input = fixture(&dir);
    let config = dir.path().join("report.toml");
    std::fs::write(&config, "top_n = 1\n\n[filter]\nyear = 2024\n").unwrap();

    let mut args = report_args(&input, ReportView::Recruiters { limit: None });
    args.config = Some(config);
    let data = json_data(&args);
    assert_eq!(data.as_array().unwrap().len(), 1);
}

#[test]
fn test_text_output_written_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = fixture(&dir);
    let output = dir.path().join("out/sectors.txt");

    let mut args = report_args(&input, ReportView::Sectors);
    args.text = true;
    args.output = Some(output.clone());
    execute_report(args).unwrap();

    let text = std::fs::read_to_string(&output).unwrap();
    assert!(text.contains("SECTORS"));
    assert!(text.contains("Technology"));
}

#[test]
fn test_compare_view() {
    let dir = tempfile::tempdir().unwrap();
    let input = fixture(&dir);

    let data = json_data(&report_args(
        &input,
        ReportView::Compare {
            college_a: "1".to_string(),
            college_b: "2".to_string(),
        },
    ));
    let rows = data.as_array().unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0]["metric"], "placementRate");
    assert!((rows[0]["collegeA"].as_f64().unwrap() - 95.0).abs() < 1e-9);
    assert!((rows[0]["collegeB"].as_f64().unwrap() - 80.0).abs() < 1e-9);
}

#[test]
fn test_import_then_export_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let csv_in = dir.path().join("upload.csv");
    std::fs::write(
        &csv_in,
        "Branch,Total Students,Placed Students,Average Package,Highest Package,Companies\n\
         CSE,100,90,15.5,40,\"Google, Adobe\"\n",
    )
    .unwrap();

    let json_out = dir.path().join("records.json");
    execute_import(ImportArgs {
        input: csv_in,
        output: json_out.clone(),
        college_id: Some("5".to_string()),
        college_name: Some("IIIT Hyderabad".to_string()),
        year: Some(2024),
        ..Default::default()
    })
    .unwrap();

    let imported = JsonFileSource::new(&json_out).load().unwrap();
    assert_eq!(imported.len(), 1);
    assert_eq!(imported[0].college_name, "IIIT Hyderabad");
    assert_eq!(imported[0].avg_package, 15.5);

    let csv_out = dir.path().join("export.csv");
    execute_export(ExportArgs {
        input: json_out,
        output: csv_out.clone(),
        ..Default::default()
    })
    .unwrap();

    let exported = std::fs::read_to_string(&csv_out).unwrap();
    assert!(exported.contains("IIIT Hyderabad,CSE,2024,100,90,90.00,15.50,40.00,Google; Adobe"));
}

#[test]
fn test_validate_missing_file_fails() {
    assert!(validate_records_file(PathBuf::from("/nonexistent/records.json"), None).is_err());

    let dir = tempfile::tempdir().unwrap();
    let input = fixture(&dir);
    assert!(validate_records_file(input, None).is_ok());
}
