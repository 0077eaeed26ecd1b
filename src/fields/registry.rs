use crate::models::enums::DocumentType;

/// Field slots that hold the issuing entity's name. When the filename
/// yields a name guess, these are the slots it pre-populates; the summary
/// builder also prefers them over the raw filename for source labels.
pub const ENTITY_NAME_FIELDS: [&str; 6] = [
    "employer_name",
    "payer_name",
    "broker_name",
    "business_name",
    "vendor_name",
    "bank_name",
];

pub fn is_entity_name_field(field_name: &str) -> bool {
    ENTITY_NAME_FIELDS.contains(&field_name)
}

/// Ordered structured fields expected for a document type. Empty for types
/// with nothing to key in ("other").
pub fn expected_fields(document_type: &DocumentType) -> &'static [&'static str] {
    match document_type {
        DocumentType::W2 => &[
            "employer_name",
            "employer_ein",
            "wages_tips_compensation",
            "federal_tax_withheld",
            "social_security_wages",
            "social_security_tax",
            "medicare_wages",
            "medicare_tax",
            "state",
            "state_wages",
            "state_tax_withheld",
        ],
        DocumentType::Form1099Int => &[
            "payer_name",
            "payer_tin",
            "interest_income",
            "early_withdrawal_penalty",
            "federal_tax_withheld",
        ],
        DocumentType::Form1099Div => &[
            "payer_name",
            "payer_tin",
            "ordinary_dividends",
            "qualified_dividends",
            "capital_gain_distributions",
            "federal_tax_withheld",
        ],
        DocumentType::Form1099Misc => &[
            "payer_name",
            "payer_tin",
            "rents",
            "royalties",
            "other_income",
            "federal_tax_withheld",
        ],
        DocumentType::Form1099Nec => &[
            "payer_name",
            "payer_tin",
            "nonemployee_compensation",
            "federal_tax_withheld",
        ],
        DocumentType::Form1099B => &[
            "broker_name",
            "broker_tin",
            "proceeds",
            "cost_basis",
            "gain_loss",
            "wash_sale_loss",
        ],
        DocumentType::ScheduleC => &[
            "business_name",
            "business_ein",
            "gross_receipts",
            "total_expenses",
            "net_profit_loss",
        ],
        DocumentType::Receipt => &["vendor_name", "expense_category", "amount", "date"],
        DocumentType::BankStatement => &[
            "bank_name",
            "account_type",
            "statement_period",
            "ending_balance",
        ],
        DocumentType::Other => &[],
    }
}

/// Whether documents of this type need preparer data entry at all.
pub fn requires_data_entry(document_type: &DocumentType) -> bool {
    !expected_fields(document_type).is_empty()
}

/// Human label for a field name. Curated where the form box matters;
/// otherwise a generic snake_case → Title Case transform.
pub fn field_label(field_name: &str) -> String {
    match curated_label(field_name) {
        Some(label) => label.to_string(),
        None => field_name
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" "),
    }
}

fn curated_label(field_name: &str) -> Option<&'static str> {
    let label = match field_name {
        "employer_name" => "Employer Name",
        "employer_ein" => "Employer EIN",
        "wages_tips_compensation" => "Wages (Box 1)",
        "federal_tax_withheld" => "Federal Tax Withheld",
        "social_security_wages" => "Social Security Wages",
        "social_security_tax" => "Social Security Tax",
        "medicare_wages" => "Medicare Wages",
        "medicare_tax" => "Medicare Tax",
        "state" => "State",
        "state_wages" => "State Wages",
        "state_tax_withheld" => "State Tax Withheld",
        "payer_name" => "Payer Name",
        "payer_tin" => "Payer TIN",
        "interest_income" => "Interest Income (Box 1)",
        "early_withdrawal_penalty" => "Early Withdrawal Penalty",
        "ordinary_dividends" => "Ordinary Dividends (Box 1a)",
        "qualified_dividends" => "Qualified Dividends (Box 1b)",
        "capital_gain_distributions" => "Capital Gain Distributions",
        "rents" => "Rents",
        "royalties" => "Royalties",
        "other_income" => "Other Income",
        "nonemployee_compensation" => "Nonemployee Compensation (Box 1)",
        "broker_name" => "Broker Name",
        "broker_tin" => "Broker TIN",
        "proceeds" => "Proceeds",
        "cost_basis" => "Cost Basis",
        "gain_loss" => "Gain/Loss",
        "wash_sale_loss" => "Wash Sale Loss",
        "business_name" => "Business Name",
        "business_ein" => "Business EIN",
        "gross_receipts" => "Gross Receipts",
        "total_expenses" => "Total Expenses",
        "net_profit_loss" => "Net Profit/Loss",
        "vendor_name" => "Vendor Name",
        "expense_category" => "Category",
        "amount" => "Amount",
        "date" => "Date",
        "bank_name" => "Bank Name",
        "account_type" => "Account Type",
        "statement_period" => "Statement Period",
        "ending_balance" => "Ending Balance",
        _ => return None,
    };
    Some(label)
}
