//! Tests for delimiter sniffing and delimited decoding

use super::*;
use crate::app::models::CellValue;
use crate::app::services::tabular_loader::{DelimitedAttempt, sniff_delimiter};
use crate::config::TextEncoding;
use crate::constants::DEFAULT_DELIMITERS;

#[test]
fn test_sniff_comma() {
    assert_eq!(
        sniff_delimiter(&create_comma_export(), DEFAULT_DELIMITERS),
        Some(b',')
    );
}

#[test]
fn test_sniff_semicolon() {
    assert_eq!(
        sniff_delimiter(&create_semicolon_export(), DEFAULT_DELIMITERS),
        Some(b';')
    );
}

#[test]
fn test_sniff_tab() {
    let content = "Hora\tVía\tTránsito\n08:00:01\t1\t1001\n08:00:02\t2\t1002";
    assert_eq!(sniff_delimiter(content, DEFAULT_DELIMITERS), Some(b'\t'));
}

#[test]
fn test_sniff_ignores_commas_inside_quotes() {
    let content = "Hora;Vía;Descripción\n08:00:01;1;\"Tránsito, TAG\"\n08:00:02;2;\"Otro, exento\"";
    assert_eq!(sniff_delimiter(content, DEFAULT_DELIMITERS), Some(b';'));
}

#[test]
fn test_sniff_fails_on_single_column() {
    let content = "solo una columna\notra linea\n";
    assert_eq!(sniff_delimiter(content, DEFAULT_DELIMITERS), None);
}

#[test]
fn test_attempt_reads_all_rows_without_header() {
    let content = create_comma_export();
    let attempt = DelimitedAttempt::new(TextEncoding::Utf8, DEFAULT_DELIMITERS);
    let (grid, delimiter) = attempt.read(content.as_bytes()).unwrap();

    assert_eq!(delimiter, b',');
    // The all-empty separator line is still a row
    assert_eq!(grid.len(), 7);
    assert_eq!(grid.width(), 6);
    assert_eq!(
        grid.rows()[0][0],
        CellValue::Text("Reporte de Tránsitos".to_string())
    );
    assert_eq!(grid.rows()[3][1], CellValue::Text("Vía".to_string()));
    assert_eq!(grid.rows()[5][2], CellValue::Empty);
}

#[test]
fn test_attempt_rejects_invalid_utf8() {
    let bytes = encode_latin1(&create_comma_export());
    let attempt = DelimitedAttempt::new(TextEncoding::Utf8, DEFAULT_DELIMITERS);
    let error = attempt.read(&bytes).unwrap_err();
    assert!(error.contains("utf-8"));
}

#[test]
fn test_ragged_rows_are_padded() {
    let content = "Titulo\nHora,Vía,Tránsito,Descripción\n08:00:01,1,1001";
    let attempt = DelimitedAttempt::new(TextEncoding::Utf8, DEFAULT_DELIMITERS);
    let (grid, _) = attempt.read(content.as_bytes()).unwrap();

    assert_eq!(grid.width(), 4);
    assert_eq!(grid.rows()[0].len(), 4);
    assert_eq!(grid.rows()[2][3], CellValue::Empty);
}
