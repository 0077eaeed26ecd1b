use chrono::NaiveDate;

use super::builder::sum_amounts;
use super::types::{TaxLineItem, TaxSummary};

/// US-locale fixed-point currency: 1234.5 → "$1,234.50", negatives as
/// "-$…".
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as i64;
    let dollars = cents / 100;
    let fraction = cents % 100;
    let formatted = format!("${}.{fraction:02}", group_thousands(dollars));
    if amount.is_sign_negative() && cents > 0 {
        format!("-{formatted}")
    } else {
        formatted
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.to_string().into_bytes();
    let mut grouped = Vec::with_capacity(digits.len() + digits.len() / 3);
    for (i, b) in digits.iter().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(b',');
        }
        grouped.push(*b);
    }
    grouped.reverse();
    String::from_utf8(grouped).unwrap_or_default()
}

/// Render the flat plain-text export the tax-prep workspace hands to the
/// preparer: section headers per category, one line per item, trailing
/// totals.
pub fn render_summary_report(
    client_name: &str,
    client_email: &str,
    tax_year: i32,
    generated_on: NaiveDate,
    summary: &TaxSummary,
) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("TAX PREPARATION SUMMARY - {tax_year}"));
    lines.push(format!("Client: {client_name} ({client_email})"));
    lines.push(format!("Generated: {}", generated_on.format("%m/%d/%Y")));
    lines.push(String::new());

    lines.push("=== INCOME ===".into());
    for (heading, items) in summary.income_sections() {
        if !items.is_empty() {
            lines.push(format!("\n{heading}:"));
            for item in items {
                lines.push(line_item(item));
            }
        }
    }
    lines.push(format!(
        "\nTOTAL INCOME: {}",
        format_currency(summary.total_income)
    ));

    lines.push("\n=== WITHHOLDINGS ===".into());
    lines.push(format!(
        "Federal Tax Withheld: {}",
        format_currency(summary.total_federal_withheld)
    ));
    lines.push(format!(
        "State Tax Withheld: {}",
        format_currency(summary.total_state_withheld)
    ));
    lines.push(format!(
        "Social Security Tax: {}",
        format_currency(sum_amounts(&summary.social_security_tax))
    ));
    lines.push(format!(
        "Medicare Tax: {}",
        format_currency(sum_amounts(&summary.medicare_tax))
    ));

    if !summary.client_deductions.is_empty() {
        lines.push("\n=== DEDUCTIONS (Client-Reported) ===".into());
        for deduction in &summary.client_deductions {
            lines.push(format!(
                "  {}: {}",
                deduction.label,
                format_currency(deduction.amount)
            ));
        }
        lines.push(format!(
            "TOTAL DEDUCTIONS: {}",
            format_currency(summary.total_client_deductions)
        ));
    }

    if !summary.dependents.is_empty() {
        lines.push("\n=== DEPENDENTS ===".into());
        for dependent in &summary.dependents {
            lines.push(format!(
                "  {} ({}) - DOB: {}",
                dependent.name, dependent.relationship, dependent.dob
            ));
        }
    }

    lines.join("\n")
}

fn line_item(item: &TaxLineItem) -> String {
    let verified = if item.verified { " [Verified]" } else { "" };
    format!(
        "  {} - {}: {}{}",
        item.source,
        item.label,
        format_currency(item.amount),
        verified
    )
}
