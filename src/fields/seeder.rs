use crate::classify::extract_name;
use crate::fields::registry::{expected_fields, is_entity_name_field};
use crate::models::enums::{DocumentType, ExtractionMethod};

/// Confidence for a name slot pre-filled from the filename: an unverified
/// guess, below anything a real extraction would claim and well below the
/// 1.0 a preparer verification pins.
pub const FILENAME_NAME_CONFIDENCE: f64 = 0.6;

/// A scaffolded field before persistence. Confidence is on the internal
/// [0,1] scale; the intake pipeline converts when writing rows.
#[derive(Debug, Clone, PartialEq)]
pub struct SeededField {
    pub field_name: &'static str,
    pub field_value: Option<String>,
    pub confidence: f64,
    pub extraction_method: ExtractionMethod,
}

/// Build the initial field scaffold for a newly uploaded document.
///
/// One record per expected field, valueless at zero confidence — except
/// entity-name slots, which take the filename-derived name guess when one
/// exists. Types without a schema get no scaffold at all.
pub fn seed_fields(filename: &str, document_type: &DocumentType) -> Vec<SeededField> {
    let fields = expected_fields(document_type);
    if fields.is_empty() {
        return Vec::new();
    }

    let extracted_name = extract_name(filename);

    fields
        .iter()
        .map(|&field_name| {
            let (field_value, confidence) = match &extracted_name {
                Some(name) if is_entity_name_field(field_name) => {
                    (Some(name.clone()), FILENAME_NAME_CONFIDENCE)
                }
                _ => (None, 0.0),
            };

            SeededField {
                field_name,
                field_value,
                confidence,
                extraction_method: ExtractionMethod::Deterministic,
            }
        })
        .collect()
}
