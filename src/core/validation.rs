use rust_decimal::Decimal;

use super::aggregate::round_currency;
use super::error::{TotalsRule, ValidationError};
use super::types::*;

/// Re-check the arithmetic of computed totals.
/// Returns all inconsistencies found (not just the first).
pub fn validate_totals(totals: &DocumentTotals) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    // TOT-01: net + vat = gross
    if totals.net_total + totals.vat_total != totals.gross_total {
        errors.push(ValidationError::new(
            TotalsRule::Reconciles,
            "net_total",
            format!(
                "net total {} + VAT total {} does not match gross total {}",
                totals.net_total, totals.vat_total, totals.gross_total
            ),
        ));
    }

    // TOT-02: VAT total is the sum of the rounded group amounts
    let group_vat: Decimal = totals.groups.iter().map(|g| g.vat_sum).sum();
    if totals.vat_total != group_vat {
        errors.push(ValidationError::new(
            TotalsRule::VatMatchesGroups,
            "vat_total",
            format!(
                "VAT total {} does not match sum of group amounts {}",
                totals.vat_total, group_vat
            ),
        ));
    }

    // TOT-03: gross total is the rounded sum of group gross amounts
    let group_gross: Decimal = totals.groups.iter().map(|g| g.gross_sum).sum();
    if totals.gross_total != round_currency(group_gross) {
        errors.push(ValidationError::new(
            TotalsRule::GrossMatchesGroups,
            "gross_total",
            format!(
                "gross total {} does not match sum of group gross amounts {}",
                totals.gross_total, group_gross
            ),
        ));
    }

    for (i, group) in totals.groups.iter().enumerate() {
        validate_group(group, i, &mut errors);
    }

    // Each key may only appear once
    for (i, group) in totals.groups.iter().enumerate() {
        if totals.groups[..i].iter().any(|g| g.rate_key == group.rate_key) {
            errors.push(ValidationError::new(
                TotalsRule::UniqueGroups,
                format!("groups[{i}].rate_key"),
                format!("duplicate VAT group {}", group.rate_key),
            ));
        }
    }

    errors
}

fn validate_group(group: &VatGroup, index: usize, errors: &mut Vec<ValidationError>) {
    let prefix = format!("groups[{index}]");

    // TOT-04: group net + vat = group gross
    if group.net_sum + group.vat_sum != group.gross_sum {
        errors.push(ValidationError::new(
            TotalsRule::GroupReconciles,
            format!("{prefix}.net_sum"),
            format!(
                "group {}: net {} + VAT {} does not match gross {}",
                group.rate_key, group.net_sum, group.vat_sum, group.gross_sum
            ),
        ));
    }

    if group.vat_sum != group.vat_sum.round_dp(2) {
        errors.push(ValidationError::new(
            TotalsRule::GroupVatInCents,
            format!("{prefix}.vat_sum"),
            format!("group VAT {} has more than 2 decimal places", group.vat_sum),
        ));
    }
}
