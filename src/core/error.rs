use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while loading line items or building documents.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BilanzError {
    /// A VAT rate outside the supported domain.
    #[error("invalid VAT rate {0}%: rate must lie between -99 and 1000")]
    InvalidRate(Decimal),

    /// A gross or VAT amount beyond [`MAX_AMOUNT`](super::MAX_AMOUNT).
    #[error("amount {0} out of range: magnitude must not exceed 1000000000000")]
    AmountOutOfRange(Decimal),

    /// Amount or rate text could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// Builder encountered invalid or missing configuration.
    #[error("builder error: {0}")]
    Builder(String),
}

/// Consistency rule checked by [`validate_totals`](super::validate_totals).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TotalsRule {
    /// TOT-01: net total plus VAT total equals the gross total.
    Reconciles,
    /// TOT-02: VAT total is the sum of the rounded group amounts.
    VatMatchesGroups,
    /// TOT-03: gross total is the rounded sum of the group gross amounts.
    GrossMatchesGroups,
    /// TOT-04: net plus VAT equals gross within each group.
    GroupReconciles,
    /// TOT-05: no rate key appears twice.
    UniqueGroups,
    /// TOT-06: group VAT is rounded to cents.
    GroupVatInCents,
}

impl TotalsRule {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Reconciles => "TOT-01",
            Self::VatMatchesGroups => "TOT-02",
            Self::GrossMatchesGroups => "TOT-03",
            Self::GroupReconciles => "TOT-04",
            Self::UniqueGroups => "TOT-05",
            Self::GroupVatInCents => "TOT-06",
        }
    }
}

impl std::fmt::Display for TotalsRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// A totals figure that breaks one of the [`TotalsRule`]s.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{rule}] {field}: {message}")]
pub struct ValidationError {
    pub rule: TotalsRule,
    /// Path to the offending figure, e.g. `groups[1].vat_sum`.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(rule: TotalsRule, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            rule,
            field: field.into(),
            message: message.into(),
        }
    }
}
