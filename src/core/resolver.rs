//! Per-position VAT decomposition: net and VAT from gross.
//!
//! Nothing here rounds. Positions keep full precision and rounding happens
//! once per VAT group during aggregation.

use rust_decimal::Decimal;
use tracing::warn;

use super::types::{LineItem, MAX_AMOUNT, VatMode, VatRate};

/// Net part of `gross` at `rate`. `None` if the quotient does not fit a
/// `Decimal`, which cannot happen for amounts within [`MAX_AMOUNT`].
pub fn net_from_gross(gross: Decimal, rate: VatRate) -> Option<Decimal> {
    gross.checked_div(rate.divisor())
}

/// Recompute `net` and `vat` of `item` from its gross amount and VAT mode.
///
/// Without a usable gross amount there is nothing to decompose; the derived
/// fields are cleared. Amounts beyond [`MAX_AMOUNT`] count as unusable.
pub fn derive_from_gross(item: &mut LineItem) {
    let Some(gross) = item.gross else {
        item.net = None;
        item.vat = None;
        return;
    };

    let net = match item.vat_mode {
        _ if gross.abs() > MAX_AMOUNT => None,
        VatMode::ExplicitRate(rate) => net_from_gross(gross, rate),
        VatMode::LegacyFlag(applied) => net_from_gross(gross, VatRate::from_flag(applied)),
        VatMode::LegacyPrecomputed(vat) if vat.abs() <= MAX_AMOUNT => Some(gross - vat),
        VatMode::LegacyPrecomputed(_) => None,
    };

    let Some(net) = net else {
        warn!(%gross, mode = ?item.vat_mode, "amount out of range, position left undivided");
        item.net = None;
        item.vat = None;
        return;
    };

    item.net = Some(net);
    item.vat = Some(gross - net);
}

/// The legacy "VAT applied" checkbox changed: switch the position to the
/// implied explicit rate and recompute.
pub fn recompute_rate_from_flag(item: &mut LineItem, applied: bool) {
    item.vat_mode = VatMode::ExplicitRate(VatRate::from_flag(applied));
    derive_from_gross(item);
}

/// The rate field changed: switch to `rate` and recompute.
pub fn recompute_from_explicit_rate(item: &mut LineItem, rate: VatRate) {
    item.vat_mode = VatMode::ExplicitRate(rate);
    derive_from_gross(item);
}

/// Return `item` with `net` and `vat` in sync with its gross amount.
pub fn resolve_line_item(mut item: LineItem) -> LineItem {
    derive_from_gross(&mut item);
    item
}
