//! Plate and tag extraction from observation annotations
//!
//! Operators and lane software leave free text such as
//! `"Patente: AB123CD - Tag: 0012345"` in the observation column. Each field is
//! the first alphanumeric run after its label. Captured values are not
//! validated against plate or tag formats.

use regex::Regex;
use std::sync::LazyLock;

use crate::constants::NOT_AVAILABLE;

static PLATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)patente:\s*([[:alnum:]]+)").expect("plate pattern is valid")
});

static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:n[úu]mero|tag):\s*([[:alnum:]]+)").expect("tag pattern is valid")
});

/// Sub-fields pulled out of one observation string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub plate: String,
    pub tag_id: String,
}

/// Extract plate and tag from an observation, "N/A" for whatever is missing
pub fn extract_annotation(observation: Option<&str>) -> Annotation {
    Annotation {
        plate: extract_plate(observation),
        tag_id: extract_tag(observation),
    }
}

/// First run of letters/digits after "Patente:"
pub fn extract_plate(observation: Option<&str>) -> String {
    first_capture(&PLATE_PATTERN, observation)
}

/// First run of letters/digits after "Número:" or "Tag:"
pub fn extract_tag(observation: Option<&str>) -> String {
    first_capture(&TAG_PATTERN, observation)
}

fn first_capture(pattern: &Regex, text: Option<&str>) -> String {
    text.and_then(|text| pattern.captures(text))
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
