//! Integration tests for the Telepase processing pipeline
//!
//! These tests write realistic lane exports to temporary files and run them
//! through the public processor API end to end.

use rust_xlsxwriter::{Format, Workbook};
use std::io::Write;
use tempfile::{Builder, NamedTempFile};

use telepase_monitor::app::services::tabular_loader::{LoadSource, SpreadsheetEngine};
use telepase_monitor::{
    ErrorKind, LaneFilter, MonitorConfig, ReadStatus, TelepaseProcessor,
};

/// Export with report boilerplate, a manual marker line and skip rows
fn sample_export() -> String {
    [
        "Concesionaria Vial del Norte,,,,,,",
        "Reporte de Tránsitos por Vía,,,,,,",
        "Desde: 01/03/2024 Hasta: 01/03/2024,,,,,,",
        ",,,,,,",
        "Hora,Vía,Tránsito,Sentido,Categoría,Descripción,Observación",
        "06:00:01,1,1001,Norte,2,Tránsito TAG,Tag: 0012345",
        "06:00:07,1,1002,Norte,2,Tránsito TAG,Tag: 0012399",
        ",1,,Norte,,Tránsito con Patente Ingresada Manualmente,Patente: AB123CD",
        ",1,,,,Apertura de barrera,",
        "06:00:15,1,1003,Norte,2,Tránsito TAG,Patente: AB123CD",
        "06:01:02,2,2001,Sur,1,Tránsito Exento,",
        "06:01:09,2,2002,Sur,2,Violación,Patente: XYZ987",
        "06:01:30,2,2003,Sur,2,Tránsito TAG,Número: 77",
        ",,Total,,,,",
    ]
    .join("\n")
}

/// Workbook export: title at B2, header at row 3 starting in column B,
/// time-formatted and plain-serial Hora cells, numeric Vía and Tránsito
fn sample_workbook() -> Vec<u8> {
    let mut workbook = Workbook::new();
    let time_format = Format::new().set_num_format("hh:mm:ss");
    let sheet = workbook.add_worksheet();

    sheet.write_string(1, 1, "Reporte de Tránsitos").unwrap();
    for (col, name) in ["Hora", "Vía", "Tránsito", "Descripción", "Observación"]
        .iter()
        .enumerate()
    {
        sheet.write_string(3, 1 + col as u16, *name).unwrap();
    }

    // 06:30:00 stored as a formatted day fraction
    sheet
        .write_number_with_format(4, 1, 23400.0 / 86400.0, &time_format)
        .unwrap();
    sheet.write_number(4, 2, 1).unwrap();
    sheet.write_number(4, 3, 1001).unwrap();
    sheet.write_string(4, 4, "Tránsito TAG").unwrap();
    sheet.write_string(4, 5, "Tag: 555").unwrap();

    sheet.write_number(5, 2, 1).unwrap();
    sheet
        .write_string(5, 4, "Tránsito con Patente Ingresada Manualmente")
        .unwrap();
    sheet.write_string(5, 5, "Patente: AB123CD").unwrap();

    sheet.write_number(6, 1, 0.5).unwrap();
    sheet.write_number(6, 2, 1).unwrap();
    sheet.write_number(6, 3, 1002).unwrap();
    sheet.write_string(6, 4, "Tránsito TAG").unwrap();

    sheet.write_number(7, 2, 2).unwrap();
    sheet.write_number(7, 3, 2001).unwrap();
    sheet.write_string(7, 4, "Violación").unwrap();

    workbook.save_to_buffer().unwrap()
}

fn write_export(content: &[u8], suffix: &str) -> NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content).unwrap();
    file.flush().unwrap();
    file
}

fn processor() -> TelepaseProcessor {
    TelepaseProcessor::new(MonitorConfig::default()).unwrap()
}

#[test]
fn test_full_pipeline_from_csv_file() {
    let file = write_export(sample_export().as_bytes(), ".csv");
    let report = processor().process_file(file.path()).unwrap();

    assert_eq!(report.header_row, 4);
    assert_eq!(report.records.len(), 6);

    let statuses: Vec<(u64, ReadStatus)> = report
        .records
        .iter()
        .map(|record| (record.transit, record.status))
        .collect();
    assert_eq!(
        statuses,
        vec![
            (1001, ReadStatus::ReadOk),
            (1002, ReadStatus::ReadOk),
            (1003, ReadStatus::ManualUnread),
            (2001, ReadStatus::OtherViolationOrExempt),
            (2002, ReadStatus::OtherViolationOrExempt),
            (2003, ReadStatus::ReadOk),
        ]
    );

    let manual = &report.records[2];
    assert_eq!(manual.time, "06:00:15");
    assert_eq!(manual.plate, "AB123CD");
    assert_eq!(manual.tag_id, "N/A");
    assert_eq!(manual.lane, "1");
    assert_eq!(manual.direction, "Norte");

    assert_eq!(report.records[0].tag_id, "0012345");
    assert_eq!(report.records[5].tag_id, "77");

    assert_eq!(report.stats.manual_markers_seen, 1);
    assert_eq!(report.stats.rows_skipped, 3);
}

#[test]
fn test_summary_and_lane_filter() {
    let report = processor()
        .process_bytes(sample_export().as_bytes(), "reporte.csv")
        .unwrap();

    let summary = report.summary();
    assert_eq!(summary.total, 6);
    assert_eq!(summary.read_ok, 3);
    assert_eq!(summary.manual_unread, 1);
    assert_eq!(summary.effectiveness_label(), "50.0%");

    assert_eq!(report.lanes(), vec!["1", "2"]);

    let lane_two = report.filtered_summary(&LaneFilter::only(["2"]));
    assert_eq!(lane_two.total, 3);
    assert_eq!(lane_two.read_ok, 1);

    let df = report.to_dataframe(&LaneFilter::only(["1"])).unwrap();
    assert_eq!(df.height(), 3);
}

#[test]
fn test_pipeline_is_idempotent() {
    let bytes = sample_export().into_bytes();
    let processor = processor();

    let first = processor.process_bytes(&bytes, "reporte.csv").unwrap();
    let second = processor.process_bytes(&bytes, "reporte.csv").unwrap();
    assert_eq!(first.records, second.records);
}

#[test]
fn test_latin1_semicolon_export() {
    let content = sample_export().replace(',', ";");
    let bytes: Vec<u8> = content
        .chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect();

    let report = processor().process_bytes(&bytes, "REPORTE.CSV").unwrap();
    assert_eq!(report.records.len(), 6);
    assert!(report.columns.contains(&"Descripción".to_string()));
}

#[test]
fn test_header_outside_scan_window() {
    let mut lines: Vec<String> = (0..50).map(|i| format!("Linea {},,", i)).collect();
    lines.push("Hora,Vía,Tránsito,Descripción".to_string());
    lines.push("06:00:01,1,1001,Tránsito TAG".to_string());

    let error = processor()
        .process_bytes(lines.join("\n").as_bytes(), "reporte.csv")
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::HeaderNotFound);

    let wider = TelepaseProcessor::new(MonitorConfig::default().with_header_scan_rows(51)).unwrap();
    let report = wider
        .process_bytes(lines.join("\n").as_bytes(), "reporte.csv")
        .unwrap();
    assert_eq!(report.header_row, 50);
}

#[test]
fn test_missing_required_column_lists_available() {
    let content = "Reporte,,\nHora,Vía,Patente\n06:00:01,1,AB123CD";
    let error = processor()
        .process_bytes(content.as_bytes(), "reporte.csv")
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::RequiredColumnMissing);
    let message = error.to_string();
    assert!(message.contains("Tránsito"));
    assert!(message.contains("Patente"));
}

#[test]
fn test_no_valid_transits_is_empty_result() {
    let content = "Hora,Vía,Tránsito,Descripción\n,1,,Apertura de turno\n,1,Total,";
    let error = processor()
        .process_bytes(content.as_bytes(), "reporte.csv")
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::EmptyResult);
}

#[test]
fn test_corrupt_spreadsheet_is_load_error() {
    let file = write_export(b"not really an excel workbook", ".xls");
    let error = processor().process_file(file.path()).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Load);
}

#[test]
fn test_missing_file_is_io_error() {
    let error = processor()
        .process_file(std::path::Path::new("/nonexistent/reporte.csv"))
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Io);
}

#[test]
fn test_xlsx_workbook_pipeline() {
    let file = write_export(&sample_workbook(), ".xlsx");
    let report = processor().process_file(file.path()).unwrap();

    assert_eq!(
        report.source,
        LoadSource::Spreadsheet {
            engine: SpreadsheetEngine::Xlsx
        }
    );
    // Rows and columns are counted from A1, not from the first used cell
    assert_eq!(report.header_row, 3);
    assert_eq!(report.records.len(), 3);

    let tagged = &report.records[0];
    assert_eq!(tagged.transit, 1001);
    assert_eq!(tagged.time, "06:30:00");
    assert_eq!(tagged.lane, "1");
    assert_eq!(tagged.tag_id, "555");
    assert_eq!(tagged.status, ReadStatus::ReadOk);

    let manual = &report.records[1];
    assert_eq!(manual.transit, 1002);
    assert_eq!(manual.time, "12:00:00");
    assert_eq!(manual.plate, "AB123CD");
    assert_eq!(manual.status, ReadStatus::ManualUnread);

    let violation = &report.records[2];
    assert_eq!(violation.lane, "2");
    assert_eq!(violation.time, "N/A");
    assert_eq!(violation.status, ReadStatus::OtherViolationOrExempt);
}

#[test]
fn test_misnamed_workbook_falls_back_to_auto_engine() {
    let report = processor()
        .process_bytes(&sample_workbook(), "reporte.xls")
        .unwrap();

    assert_eq!(
        report.source,
        LoadSource::Spreadsheet {
            engine: SpreadsheetEngine::AutoDetect
        }
    );
    assert_eq!(report.records.len(), 3);
}
