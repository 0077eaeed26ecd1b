use std::collections::HashMap;

use uuid::Uuid;

use crate::fields::{field_label, is_entity_name_field};
use crate::models::ClientTaxInfo;

use super::types::{
    DocumentField, IncomeCategory, SummaryDependent, TaxLineItem, TaxSummary, WithholdingCategory,
};

/// Source tag for items the client keyed in themselves.
pub const CLIENT_REPORTED_SOURCE: &str = "Client-reported";

/// Tolerant amount parsing for portal-entered and scaffolded values:
/// strips one leading `$` and thousands separators, then parses. Anything
/// that still fails is "not a number" and the item is skipped, never an
/// error.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let normalized = trimmed.replace(',', "");
    if normalized.is_empty() {
        return None;
    }
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn income_category(field_name: &str) -> Option<IncomeCategory> {
    let category = match field_name {
        "wages_tips_compensation" => IncomeCategory::Wages,
        "interest_income" => IncomeCategory::Interest,
        "ordinary_dividends" | "qualified_dividends" => IncomeCategory::Dividend,
        "gross_receipts" | "net_profit_loss" => IncomeCategory::Business,
        "gain_loss" | "proceeds" => IncomeCategory::CapitalGains,
        "nonemployee_compensation" | "rents" | "royalties" | "other_income" | "amount" => {
            IncomeCategory::Other
        }
        _ => return None,
    };
    Some(category)
}

fn withholding_category(field_name: &str) -> Option<WithholdingCategory> {
    let category = match field_name {
        "federal_tax_withheld" => WithholdingCategory::Federal,
        "state_tax_withheld" => WithholdingCategory::State,
        "social_security_tax" => WithholdingCategory::SocialSecurity,
        "medicare_tax" => WithholdingCategory::Medicare,
        _ => return None,
    };
    Some(category)
}

/// Client-entered income type tags map to the same six buckets; anything
/// unrecognized rolls up as other income.
fn client_income_category(source_type: &str) -> IncomeCategory {
    match source_type {
        "w2_wages" => IncomeCategory::Wages,
        "1099_int" => IncomeCategory::Interest,
        "1099_div" => IncomeCategory::Dividend,
        "1099_b" => IncomeCategory::CapitalGains,
        "business" => IncomeCategory::Business,
        "1099_nec" | "1099_misc" | "rental" | "retirement" | "social_security" | "other" => {
            IncomeCategory::Other
        }
        _ => IncomeCategory::Other,
    }
}

fn has_value(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

/// Within one document, a gross figure is dropped when the net figure it
/// duplicates is also present: proceeds yield to gain/loss, gross receipts
/// to net profit. Exactly these two pairs; the sibling only needs a
/// non-empty value.
fn suppressed_as_double_count(field: &DocumentField, fields: &[DocumentField]) -> bool {
    let net_sibling = match field.field_name.as_str() {
        "proceeds" => "gain_loss",
        "gross_receipts" => "net_profit_loss",
        _ => return false,
    };
    fields.iter().any(|f| {
        f.document_id == field.document_id
            && f.field_name == net_sibling
            && has_value(f.field_value.as_deref())
    })
}

/// Build the tax summary for one client and year.
///
/// Pure over its inputs: extracted fields (joined with document context)
/// plus the optional self-reported blob. Malformed or zero amounts are
/// skipped silently; a missing blob contributes nothing.
pub fn build_summary(
    fields: &[DocumentField],
    client_tax_info: Option<&ClientTaxInfo>,
) -> TaxSummary {
    let mut summary = TaxSummary::default();

    // Display label per document: a populated entity-name field if the
    // document has one, otherwise its file name.
    let mut doc_labels: HashMap<Uuid, String> = HashMap::new();
    for field in fields {
        doc_labels.entry(field.document_id).or_insert_with(|| {
            fields
                .iter()
                .find(|f| {
                    f.document_id == field.document_id
                        && is_entity_name_field(&f.field_name)
                        && has_value(f.field_value.as_deref())
                })
                .and_then(|f| f.field_value.clone())
                .unwrap_or_else(|| field.file_name.clone())
        });
    }

    for field in fields {
        let amount = match field.field_value.as_deref().and_then(parse_amount) {
            Some(amount) if amount != 0.0 => amount,
            _ => continue,
        };

        let source = doc_labels
            .get(&field.document_id)
            .cloned()
            .unwrap_or_else(|| "Document".to_string());

        if let Some(category) = income_category(&field.field_name) {
            if !suppressed_as_double_count(field, fields) {
                summary.income_bucket_mut(category).push(TaxLineItem {
                    label: field_label(&field.field_name),
                    amount,
                    source: source.clone(),
                    verified: field.manually_verified,
                    document_id: Some(field.document_id),
                    field_id: Some(field.id),
                });
            }
        }

        if let Some(category) = withholding_category(&field.field_name) {
            summary.withholding_bucket_mut(category).push(TaxLineItem {
                label: field_label(&field.field_name),
                amount,
                source,
                verified: field.manually_verified,
                document_id: Some(field.document_id),
                field_id: Some(field.id),
            });
        }
    }

    if let Some(info) = client_tax_info {
        for income in &info.income_sources {
            let Some(amount) = parse_amount(&income.amount) else {
                continue;
            };
            if amount == 0.0 {
                continue;
            }

            let label = if income.source_name.is_empty() {
                income.source_type.clone()
            } else {
                income.source_name.clone()
            };

            // Self-reported entries are never preparer-verified
            summary
                .income_bucket_mut(client_income_category(&income.source_type))
                .push(TaxLineItem {
                    label,
                    amount,
                    source: CLIENT_REPORTED_SOURCE.to_string(),
                    verified: false,
                    document_id: None,
                    field_id: None,
                });
        }

        for deduction in &info.deductions {
            let Some(amount) = parse_amount(&deduction.amount) else {
                continue;
            };
            if amount == 0.0 {
                continue;
            }

            let label = if deduction.description.is_empty() {
                deduction.category.clone()
            } else {
                deduction.description.clone()
            };

            summary.client_deductions.push(TaxLineItem {
                label,
                amount,
                source: CLIENT_REPORTED_SOURCE.to_string(),
                verified: false,
                document_id: None,
                field_id: None,
            });
        }

        summary.dependents = info
            .dependents
            .iter()
            .map(|d| SummaryDependent {
                name: d.name.clone(),
                relationship: d.relationship.clone(),
                dob: d.date_of_birth.clone(),
            })
            .collect();
    }

    let total_income: f64 = summary
        .income_sections()
        .iter()
        .map(|(_, items)| sum_amounts(items))
        .sum();
    summary.total_income = total_income;
    summary.total_federal_withheld = sum_amounts(&summary.federal_withheld);
    summary.total_state_withheld = sum_amounts(&summary.state_withheld);
    summary.total_client_deductions = sum_amounts(&summary.client_deductions);

    summary
}

pub(crate) fn sum_amounts(items: &[TaxLineItem]) -> f64 {
    items.iter().map(|item| item.amount).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::DocumentType;
    use crate::models::{DeductionEntry, Dependent, IncomeSource};

    fn doc_field(
        document_id: Uuid,
        file_name: &str,
        document_type: DocumentType,
        field_name: &str,
        field_value: Option<&str>,
        verified: bool,
    ) -> DocumentField {
        DocumentField {
            id: Uuid::new_v4(),
            document_id,
            field_name: field_name.into(),
            field_value: field_value.map(String::from),
            manually_verified: verified,
            file_name: file_name.into(),
            document_type,
        }
    }

    fn w2_fields(document_id: Uuid) -> Vec<DocumentField> {
        vec![
            doc_field(
                document_id,
                "W2_Acme_2025.pdf",
                DocumentType::W2,
                "employer_name",
                Some("Acme Corp"),
                true,
            ),
            doc_field(
                document_id,
                "W2_Acme_2025.pdf",
                DocumentType::W2,
                "wages_tips_compensation",
                Some("52000"),
                true,
            ),
            doc_field(
                document_id,
                "W2_Acme_2025.pdf",
                DocumentType::W2,
                "federal_tax_withheld",
                Some("6400"),
                true,
            ),
            doc_field(
                document_id,
                "W2_Acme_2025.pdf",
                DocumentType::W2,
                "state_tax_withheld",
                Some("2100"),
                false,
            ),
            doc_field(
                document_id,
                "W2_Acme_2025.pdf",
                DocumentType::W2,
                "social_security_tax",
                Some("3224"),
                false,
            ),
            doc_field(
                document_id,
                "W2_Acme_2025.pdf",
                DocumentType::W2,
                "medicare_tax",
                Some("754"),
                false,
            ),
        ]
    }

    #[test]
    fn routes_wages_and_withholdings() {
        let summary = build_summary(&w2_fields(Uuid::new_v4()), None);

        assert_eq!(summary.wages_income.len(), 1);
        assert_eq!(summary.wages_income[0].amount, 52000.0);
        assert_eq!(summary.wages_income[0].source, "Acme Corp");
        assert!(summary.wages_income[0].verified);

        assert_eq!(summary.total_income, 52000.0);
        assert_eq!(summary.total_federal_withheld, 6400.0);
        assert_eq!(summary.total_state_withheld, 2100.0);
        assert_eq!(sum_amounts(&summary.social_security_tax), 3224.0);
        assert_eq!(sum_amounts(&summary.medicare_tax), 754.0);
    }

    #[test]
    fn source_label_falls_back_to_file_name() {
        let doc = Uuid::new_v4();
        let fields = vec![
            doc_field(
                doc,
                "1099-INT_chase.pdf",
                DocumentType::Form1099Int,
                "payer_name",
                None,
                false,
            ),
            doc_field(
                doc,
                "1099-INT_chase.pdf",
                DocumentType::Form1099Int,
                "interest_income",
                Some("320.55"),
                false,
            ),
        ];
        let summary = build_summary(&fields, None);
        assert_eq!(summary.interest_income[0].source, "1099-INT_chase.pdf");
    }

    #[test]
    fn proceeds_suppressed_when_gain_loss_present() {
        let doc = Uuid::new_v4();
        let fields = vec![
            doc_field(doc, "1099-B.pdf", DocumentType::Form1099B, "proceeds", Some("1000"), true),
            doc_field(doc, "1099-B.pdf", DocumentType::Form1099B, "gain_loss", Some("200"), true),
        ];
        let summary = build_summary(&fields, None);

        assert_eq!(summary.capital_gains.len(), 1);
        assert_eq!(summary.capital_gains[0].amount, 200.0);
        assert_eq!(summary.total_income, 200.0);
    }

    #[test]
    fn proceeds_counted_without_gain_loss() {
        let doc = Uuid::new_v4();
        let fields = vec![doc_field(
            doc,
            "1099-B.pdf",
            DocumentType::Form1099B,
            "proceeds",
            Some("1000"),
            false,
        )];
        let summary = build_summary(&fields, None);
        assert_eq!(summary.capital_gains.len(), 1);
        assert_eq!(summary.capital_gains[0].amount, 1000.0);
    }

    #[test]
    fn gross_receipts_suppressed_by_net_profit() {
        let doc = Uuid::new_v4();
        let fields = vec![
            doc_field(
                doc,
                "schedule_c.pdf",
                DocumentType::ScheduleC,
                "gross_receipts",
                Some("5000"),
                true,
            ),
            doc_field(
                doc,
                "schedule_c.pdf",
                DocumentType::ScheduleC,
                "net_profit_loss",
                Some("3000"),
                true,
            ),
        ];
        let summary = build_summary(&fields, None);

        assert_eq!(summary.business_income.len(), 1);
        assert_eq!(summary.business_income[0].amount, 3000.0);
    }

    #[test]
    fn suppression_is_per_document() {
        let with_net = Uuid::new_v4();
        let without_net = Uuid::new_v4();
        let fields = vec![
            doc_field(with_net, "a.pdf", DocumentType::ScheduleC, "gross_receipts", Some("5000"), false),
            doc_field(with_net, "a.pdf", DocumentType::ScheduleC, "net_profit_loss", Some("3000"), false),
            doc_field(without_net, "b.pdf", DocumentType::ScheduleC, "gross_receipts", Some("800"), false),
        ];
        let summary = build_summary(&fields, None);

        let amounts: Vec<f64> = summary.business_income.iter().map(|i| i.amount).collect();
        assert_eq!(amounts, [3000.0, 800.0]);
    }

    #[test]
    fn zero_and_unparseable_values_are_skipped() {
        let doc = Uuid::new_v4();
        let fields = vec![
            doc_field(doc, "w2.pdf", DocumentType::W2, "wages_tips_compensation", Some("0"), true),
            doc_field(doc, "w2.pdf", DocumentType::W2, "federal_tax_withheld", Some("pending"), true),
            doc_field(doc, "w2.pdf", DocumentType::W2, "state_tax_withheld", None, false),
            doc_field(doc, "w2.pdf", DocumentType::W2, "medicare_tax", Some(""), false),
        ];
        let summary = build_summary(&fields, None);

        assert!(summary.wages_income.is_empty());
        assert!(summary.federal_withheld.is_empty());
        assert!(summary.state_withheld.is_empty());
        assert!(summary.medicare_tax.is_empty());
        assert_eq!(summary.total_income, 0.0);
    }

    #[test]
    fn non_amount_fields_produce_no_line_items() {
        let doc = Uuid::new_v4();
        // employer_ein is numeric-looking but maps to no bucket
        let fields = vec![doc_field(
            doc,
            "w2.pdf",
            DocumentType::W2,
            "employer_ein",
            Some("123456789"),
            true,
        )];
        let summary = build_summary(&fields, None);
        assert_eq!(summary.total_income, 0.0);
        assert!(summary.income_sections().iter().all(|(_, items)| items.is_empty()));
    }

    #[test]
    fn client_income_merges_into_buckets() {
        let info = ClientTaxInfo {
            income_sources: vec![
                IncomeSource {
                    source_type: "w2_wages".into(),
                    source_name: "Second Job".into(),
                    amount: "12000".into(),
                },
                IncomeSource {
                    source_type: "crypto".into(),
                    source_name: "".into(),
                    amount: "450".into(),
                },
                IncomeSource {
                    source_type: "1099_int".into(),
                    source_name: "Credit Union".into(),
                    amount: "not sure".into(),
                },
            ],
            deductions: vec![],
            dependents: vec![],
        };
        let summary = build_summary(&[], Some(&info));

        assert_eq!(summary.wages_income.len(), 1);
        assert_eq!(summary.wages_income[0].label, "Second Job");
        assert_eq!(summary.wages_income[0].source, CLIENT_REPORTED_SOURCE);
        assert!(!summary.wages_income[0].verified);
        assert!(summary.wages_income[0].document_id.is_none());

        // Unrecognized type tag lands in other income, labeled by its tag
        assert_eq!(summary.other_income.len(), 1);
        assert_eq!(summary.other_income[0].label, "crypto");

        // Unparseable amount contributes nothing
        assert!(summary.interest_income.is_empty());

        assert_eq!(summary.total_income, 12450.0);
    }

    #[test]
    fn client_deductions_and_dependents() {
        let info = ClientTaxInfo {
            income_sources: vec![],
            deductions: vec![
                DeductionEntry {
                    category: "charitable".into(),
                    description: "Food bank donations".into(),
                    amount: "$1,200".into(),
                },
                DeductionEntry {
                    category: "medical".into(),
                    description: "".into(),
                    amount: "0".into(),
                },
            ],
            dependents: vec![Dependent {
                name: "Sam Whitfield".into(),
                relationship: "son".into(),
                date_of_birth: "2015-04-02".into(),
            }],
        };
        let summary = build_summary(&[], Some(&info));

        assert_eq!(summary.client_deductions.len(), 1);
        assert_eq!(summary.client_deductions[0].label, "Food bank donations");
        assert_eq!(summary.total_client_deductions, 1200.0);

        assert_eq!(summary.dependents.len(), 1);
        assert_eq!(summary.dependents[0].name, "Sam Whitfield");
        assert_eq!(summary.dependents[0].dob, "2015-04-02");
    }

    #[test]
    fn total_income_is_sum_of_all_six_buckets() {
        let w2_doc = Uuid::new_v4();
        let broker_doc = Uuid::new_v4();
        let mut fields = w2_fields(w2_doc);
        fields.push(doc_field(
            broker_doc,
            "1099-B_fid.pdf",
            DocumentType::Form1099B,
            "gain_loss",
            Some("-150.25"),
            false,
        ));

        let info = ClientTaxInfo {
            income_sources: vec![IncomeSource {
                source_type: "rental".into(),
                source_name: "Duplex".into(),
                amount: "9000".into(),
            }],
            deductions: vec![],
            dependents: vec![],
        };

        let summary = build_summary(&fields, Some(&info));
        let bucket_sum: f64 = summary
            .income_sections()
            .iter()
            .map(|(_, items)| sum_amounts(items))
            .sum();
        assert_eq!(summary.total_income, bucket_sum);
        assert_eq!(summary.total_income, 52000.0 - 150.25 + 9000.0);
    }

    #[test]
    fn missing_client_info_contributes_nothing() {
        let summary = build_summary(&[], None);
        assert_eq!(summary.total_income, 0.0);
        assert!(summary.dependents.is_empty());
        assert!(summary.client_deductions.is_empty());
    }

    #[test]
    fn parse_amount_accepts_currency_noise() {
        assert_eq!(parse_amount("1234.5"), Some(1234.5));
        assert_eq!(parse_amount("$1,234.50"), Some(1234.5));
        assert_eq!(parse_amount(" 500 "), Some(500.0));
        assert_eq!(parse_amount("-150.25"), Some(-150.25));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("$"), None);
        assert_eq!(parse_amount("12abc"), None);
        assert_eq!(parse_amount("NaN"), None);
    }
}
