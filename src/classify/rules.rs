use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::models::enums::DocumentType;

/// Confidence assigned when no rule matches: unknown but plausible, NOT the
/// zero sentinel used while scanning the rule table.
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub document_type: DocumentType,
    pub confidence: f64,
}

struct Rule {
    pattern: Regex,
    document_type: DocumentType,
    confidence: f64,
}

fn rule(pattern: &str, document_type: DocumentType, confidence: f64) -> Rule {
    Rule {
        pattern: Regex::new(pattern).unwrap(),
        document_type,
        confidence,
    }
}

/// Curated filename patterns. Exact form-code mentions score higher than
/// descriptive phrases for the same form type.
static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    use DocumentType::*;
    vec![
        // W-2
        rule(r"(?i)w[-_\s]?2", W2, 0.95),
        rule(r"(?i)wage.*statement", W2, 0.85),
        rule(r"(?i)employer.*tax", W2, 0.75),
        // 1099-INT
        rule(r"(?i)1099[-_\s]?int", Form1099Int, 0.95),
        rule(r"(?i)interest.*income", Form1099Int, 0.85),
        rule(r"(?i)interest.*statement", Form1099Int, 0.80),
        // 1099-DIV
        rule(r"(?i)1099[-_\s]?div", Form1099Div, 0.95),
        rule(r"(?i)dividend.*statement", Form1099Div, 0.85),
        // 1099-MISC
        rule(r"(?i)1099[-_\s]?misc", Form1099Misc, 0.95),
        rule(r"(?i)miscellaneous.*income", Form1099Misc, 0.80),
        // 1099-NEC
        rule(r"(?i)1099[-_\s]?nec", Form1099Nec, 0.95),
        rule(r"(?i)nonemployee.*compensation", Form1099Nec, 0.85),
        rule(r"(?i)contractor.*payment", Form1099Nec, 0.75),
        // 1099-B
        rule(r"(?i)1099[-_\s]?b\b", Form1099B, 0.95),
        rule(r"(?i)broker.*statement", Form1099B, 0.80),
        rule(r"(?i)stock.*sale", Form1099B, 0.75),
        // Schedule C
        rule(r"(?i)schedule[-_\s]?c", ScheduleC, 0.95),
        rule(r"(?i)self[-_\s]?employ", ScheduleC, 0.80),
        rule(r"(?i)business.*income", ScheduleC, 0.75),
        // Receipts / expenses
        rule(r"(?i)receipt", Receipt, 0.90),
        rule(r"(?i)expense", Receipt, 0.75),
        rule(r"(?i)invoice", Receipt, 0.70),
        // Bank statements
        rule(r"(?i)bank[-_\s]?statement", BankStatement, 0.90),
        rule(r"(?i)account[-_\s]?statement", BankStatement, 0.85),
        rule(r"(?i)(checking|savings)", BankStatement, 0.75),
    ]
});

/// Infer a document type from its filename.
///
/// Every rule is evaluated; the single highest-confidence match wins and
/// exact ties keep the earliest rule (strict `>` comparison). No match at
/// all yields `Other` at [`DEFAULT_CONFIDENCE`].
pub fn classify(filename: &str) -> ClassificationResult {
    let mut best = ClassificationResult {
        document_type: DocumentType::Other,
        confidence: 0.0,
    };

    for rule in RULES.iter() {
        if rule.pattern.is_match(filename) && rule.confidence > best.confidence {
            best = ClassificationResult {
                document_type: rule.document_type.clone(),
                confidence: rule.confidence,
            };
        }
    }

    if best.confidence == 0.0 {
        return ClassificationResult {
            document_type: DocumentType::Other,
            confidence: DEFAULT_CONFIDENCE,
        };
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_codes_score_high() {
        for (name, expected) in [
            ("W-2_Acme_2025.pdf", DocumentType::W2),
            ("w2.pdf", DocumentType::W2),
            ("1099-INT_Chase.pdf", DocumentType::Form1099Int),
            ("1099_div_fidelity.pdf", DocumentType::Form1099Div),
            ("1099 misc.pdf", DocumentType::Form1099Misc),
            ("1099-NEC-gig.pdf", DocumentType::Form1099Nec),
            ("1099-B broker.pdf", DocumentType::Form1099B),
            ("Schedule_C_2025.pdf", DocumentType::ScheduleC),
        ] {
            let result = classify(name);
            assert_eq!(result.document_type, expected, "filename {name}");
            assert!(result.confidence >= 0.85, "filename {name}");
        }
    }

    #[test]
    fn descriptive_phrases_score_lower_than_codes() {
        let phrase = classify("interest income statement.pdf");
        assert_eq!(phrase.document_type, DocumentType::Form1099Int);
        assert_eq!(phrase.confidence, 0.85);

        let code = classify("1099-INT.pdf");
        assert_eq!(code.confidence, 0.95);
    }

    #[test]
    fn unmatched_filename_defaults_to_other() {
        let result = classify("holiday-photos.zip");
        assert_eq!(result.document_type, DocumentType::Other);
        assert_eq!(result.confidence, DEFAULT_CONFIDENCE);
    }

    #[test]
    fn overlapping_patterns_keep_highest_confidence() {
        // Matches both the W-2 code (0.95) and "wage statement" (0.85)
        let result = classify("W2_wage_statement.pdf");
        assert_eq!(result.document_type, DocumentType::W2);
        assert_eq!(result.confidence, 0.95);
    }

    #[test]
    fn exact_tie_keeps_earliest_rule() {
        // Both form codes score 0.95; 1099-INT appears first in the table
        let result = classify("1099-INT_and_1099-DIV.pdf");
        assert_eq!(result.document_type, DocumentType::Form1099Int);
        assert_eq!(result.confidence, 0.95);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(classify("RECEIPT.JPG").document_type, DocumentType::Receipt);
        assert_eq!(
            classify("Bank-Statement-Jan.pdf").document_type,
            DocumentType::BankStatement
        );
        assert_eq!(
            classify("savings_account.pdf").document_type,
            DocumentType::BankStatement
        );
    }

    #[test]
    fn classify_is_deterministic() {
        let a = classify("1099-NEC_Freelance_2025.pdf");
        let b = classify("1099-NEC_Freelance_2025.pdf");
        assert_eq!(a, b);
    }
}
