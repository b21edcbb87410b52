//! Test utilities for the tabular loader
//!
//! Provides sample export content in the shapes the lane systems produce:
//! report boilerplate above the header, a semicolon-separated variant and a
//! Latin-1 encoded variant.

mod delimited_tests;

/// Comma-separated export with three boilerplate rows above the header
pub fn create_comma_export() -> String {
    [
        "Reporte de Tránsitos,,,,,",
        "Estación: Peaje Norte,,,,,",
        ",,,,,",
        "Hora,Vía,Tránsito,Sentido,Descripción,Observación",
        "08:00:01,1,1001,Norte,Tránsito TAG,Tag: ABC123",
        "08:00:05,1,,Norte,Tránsito con Patente Ingresada Manualmente,",
        "08:00:09,2,1002,Sur,Tránsito Normal,Patente: AA123BB",
    ]
    .join("\n")
}

/// Same export separated by semicolons, as written by Spanish-locale tools
pub fn create_semicolon_export() -> String {
    create_comma_export().replace(',', ";")
}

/// Encode text as ISO-8859-1 bytes
pub fn encode_latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}
