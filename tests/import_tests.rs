use placement_stats::aggregator::branch_rollups;
use placement_stats::import::{read_csv_records, CsvFileSource, ImportOptions};
use placement_stats::output::write_csv;
use placement_stats::record::{PlacementRecord, RecordFilter, RecordSource};
use placement_stats::utils::config::PackageUnit;
use placement_stats::utils::error::SourceError;
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::NamedTempFile;

const ADMIN_UPLOAD: &str = "\
Branch,Total Students,Placed Students,Average Package,Highest Package,Companies
Computer Science,120,110,18.5,45,\"Google, Microsoft, Amazon\"
Electronics,90,72,12.0,30,\"Intel, Qualcomm\"
Mechanical,60,,8.0,14,
";

#[test]
fn test_admin_upload_template() {
    let options = ImportOptions::new().with_college("3", "BITS Pilani").with_year(2024);
    let records = read_csv_records(ADMIN_UPLOAD.as_bytes(), &options).unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].college_id, "3");
    assert_eq!(records[0].branch, "Computer Science");
    assert_eq!(records[0].placed_students, 110);
    assert_eq!(records[0].highest_package, 45.0);

    let companies: Vec<&str> = records[0]
        .company_placements
        .iter()
        .map(|cp| cp.company.as_str())
        .collect();
    assert_eq!(companies, vec!["Google", "Microsoft", "Amazon"]);
    assert!(records[0].company_placements.iter().all(|cp| cp.placements == 0));

    // Empty cell is zero, not an error
    assert_eq!(records[2].placed_students, 0);
    assert!(records[2].company_placements.is_empty());
}

#[test]
fn test_snake_case_template() {
    let data = "\
college_id,college_name,branch,year,total_students,placed,avg_package,highest_package,companies
11,VIT Vellore,CSE,2023,300,270,900000,4000000,TCS;Infosys
";
    let options = ImportOptions::new().with_unit(PackageUnit::Rupees);
    let records = read_csv_records(data.as_bytes(), &options).unwrap();

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.college_id, "11");
    assert_eq!(record.college_name, "VIT Vellore");
    assert_eq!(record.year, 2023);
    assert_eq!(record.placed_students, 270);
    assert_eq!(record.avg_package, 9.0);
    assert_eq!(record.highest_package, 40.0);
    assert_eq!(record.company_placements.len(), 2);
}

#[test]
fn test_missing_college_without_default() {
    let data = "Branch,Year,Total Students\nCSE,2024,10\n";
    let result = read_csv_records(data.as_bytes(), &ImportOptions::new());
    assert!(matches!(
        result,
        Err(SourceError::MissingDefault { field: "college", .. })
    ));
}

#[test]
fn test_missing_branch_column() {
    let data = "College,Year\nA,2024\n";
    let result = read_csv_records(data.as_bytes(), &ImportOptions::new());
    assert!(matches!(result, Err(SourceError::MissingColumn(_))));
}

#[test]
fn test_csv_file_source_feeds_engine() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", ADMIN_UPLOAD).unwrap();

    let source = CsvFileSource::new(
        file.path(),
        ImportOptions::new().with_college("3", "BITS Pilani").with_year(2024),
    );
    let records = source.load().unwrap();

    let rollups = branch_rollups(&records, &RecordFilter::new().with_year(2024));
    assert_eq!(rollups.len(), 3);
    assert_eq!(rollups[0].branch, "Computer Science");
    assert_eq!(rollups[0].metrics.company_count, 3);
}

#[test]
fn test_csv_file_source_missing_file() {
    let source = CsvFileSource::new("/nonexistent/upload.csv", ImportOptions::new());
    assert!(matches!(source.load(), Err(SourceError::IoError(_))));
}

#[test]
fn test_export_reimports() {
    let records = vec![
        PlacementRecord::new("IIT Bombay", "IIT Bombay", "Computer Science", 2024)
            .with_counts(150, 140)
            .with_packages(26.5, 85.0),
        PlacementRecord::new("IIT Bombay", "IIT Bombay", "Chemical", 2024)
            .with_counts(70, 50)
            .with_packages(13.25, 28.0),
    ];

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.csv");
    write_csv(&records, &path).unwrap();

    let reloaded = CsvFileSource::new(&path, ImportOptions::new()).load().unwrap();
    assert_eq!(reloaded.len(), 2);
    for (original, back) in records.iter().zip(&reloaded) {
        assert_eq!(back.college_name, original.college_name);
        assert_eq!(back.college_id, original.college_id);
        assert_eq!(back.branch, original.branch);
        assert_eq!(back.year, original.year);
        assert_eq!(back.total_students, original.total_students);
        assert_eq!(back.placed_students, original.placed_students);
        assert_eq!(back.avg_package, original.avg_package);
        assert_eq!(back.highest_package, original.highest_package);
    }
}
