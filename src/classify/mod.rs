//! Filename-based document classification.
//!
//! Nothing here looks at file contents: the uploaded filename is the only
//! signal, so every answer is best-effort by construction and the public
//! functions never fail.

mod name;
mod rules;

pub use name::extract_name;
pub use rules::{classify, ClassificationResult, DEFAULT_CONFIDENCE};

/// Threshold above which a classification is presented as high confidence.
pub const HIGH_CONFIDENCE: f64 = 0.90;
/// Threshold above which a classification is presented as medium confidence.
pub const MEDIUM_CONFIDENCE: f64 = 0.75;

/// Human-readable description of a classification result, e.g.
/// "1099-DIV Dividend Income (High confidence)".
pub fn describe(result: &ClassificationResult) -> String {
    let level = if result.confidence >= HIGH_CONFIDENCE {
        "High confidence"
    } else if result.confidence >= MEDIUM_CONFIDENCE {
        "Medium confidence"
    } else {
        "Low confidence"
    };
    format!("{} ({})", result.document_type.label(), level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::DocumentType;

    #[test]
    fn describe_levels() {
        let high = ClassificationResult {
            document_type: DocumentType::W2,
            confidence: 0.95,
        };
        assert_eq!(describe(&high), "W-2 Wage Statement (High confidence)");

        let medium = ClassificationResult {
            document_type: DocumentType::Receipt,
            confidence: 0.75,
        };
        assert_eq!(describe(&medium), "Receipt/Expense (Medium confidence)");

        let low = ClassificationResult {
            document_type: DocumentType::Other,
            confidence: 0.5,
        };
        assert_eq!(describe(&low), "Other Document (Low confidence)");
    }
}
