use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(DocumentType {
    W2 => "w2",
    Form1099Int => "1099_int",
    Form1099Div => "1099_div",
    Form1099Misc => "1099_misc",
    Form1099Nec => "1099_nec",
    Form1099B => "1099_b",
    ScheduleC => "schedule_c",
    Receipt => "receipt",
    BankStatement => "bank_statement",
    Other => "other",
});

impl DocumentType {
    /// Human-readable form name shown in document lists and exports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::W2 => "W-2 Wage Statement",
            Self::Form1099Int => "1099-INT Interest Income",
            Self::Form1099Div => "1099-DIV Dividend Income",
            Self::Form1099Misc => "1099-MISC Miscellaneous Income",
            Self::Form1099Nec => "1099-NEC Nonemployee Compensation",
            Self::Form1099B => "1099-B Broker Transactions",
            Self::ScheduleC => "Schedule C Business Income",
            Self::Receipt => "Receipt/Expense",
            Self::BankStatement => "Bank Statement",
            Self::Other => "Other Document",
        }
    }
}

str_enum!(DocumentStatus {
    Uploaded => "uploaded",
    Processing => "processing",
    Extracted => "extracted",
    Reviewed => "reviewed",
    Complete => "complete",
});

str_enum!(ExtractionMethod {
    Deterministic => "deterministic",
    Ocr => "ocr",
    Ai => "ai",
    Manual => "manual",
});

str_enum!(FilingStatus {
    Single => "single",
    MarriedJoint => "married_joint",
    MarriedSeparate => "married_separate",
    HeadOfHousehold => "head_of_household",
    QualifyingWidow => "qualifying_widow",
});

str_enum!(TaskPriority {
    Low => "low",
    Medium => "medium",
    High => "high",
});

str_enum!(TaskStatus {
    Pending => "pending",
    InProgress => "in_progress",
    Completed => "completed",
});

str_enum!(MessageSender {
    Preparer => "preparer",
    Client => "client",
});
