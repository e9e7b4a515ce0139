//! Grouping of positions by VAT rate and document totals.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use tracing::debug;

use super::resolver::net_from_gross;
use super::types::*;

/// Round to cents, ties toward positive infinity.
///
/// Shifting the input by whole cents shifts the result by the same amount,
/// which keeps `net_total + vat_total == gross_total` exact for negative
/// totals too.
pub fn round_currency(value: Decimal) -> Decimal {
    let mut rounded = value
        .saturating_add(dec!(0.005))
        .round_dp_with_strategy(2, RoundingStrategy::ToNegativeInfinity);
    rounded.rescale(2);
    rounded
}

/// Running sums of one group while positions are being collected.
struct Bucket {
    key: RateKey,
    gross: Decimal,
    precomputed_vat: Decimal,
}

impl Bucket {
    fn new(key: RateKey) -> Self {
        Self {
            key,
            gross: Decimal::ZERO,
            precomputed_vat: Decimal::ZERO,
        }
    }

    fn close(self) -> VatGroup {
        let vat_sum = match self.key {
            RateKey::Rate(rate) => {
                // Bounded positions keep the quotient far from overflow.
                let net = net_from_gross(self.gross, rate).unwrap_or(self.gross);
                round_currency(self.gross - net)
            }
            RateKey::Mixed => round_currency(self.precomputed_vat),
        };
        VatGroup {
            rate_key: self.key,
            gross_sum: self.gross,
            vat_sum,
            net_sum: self.gross - vat_sum,
        }
    }
}

/// Group `items` by VAT rate and compute the document totals.
///
/// Groups appear in order of first use. VAT of a rate group is derived once
/// from the group's gross sum, not summed per position. Legacy positions
/// without a rate land in the [`RateKey::Mixed`] group, whose VAT is the sum
/// of their recorded amounts.
///
/// ```
/// use perlenbilanz::core::*;
/// use rust_decimal_macros::dec;
///
/// let items = vec![
///     LineItemBuilder::new(ItemType::Goods).gross(dec!(119)).rate(VatRate::STANDARD).build(),
///     LineItemBuilder::new(ItemType::Goods).gross(dec!(107)).rate(VatRate::REDUCED).build(),
/// ];
/// let totals = aggregate(&items);
/// assert_eq!(totals.groups.len(), 2);
/// assert_eq!(totals.gross_total, dec!(226.00));
/// assert_eq!(totals.vat_total, dec!(26.00));
/// assert_eq!(totals.net_total, dec!(200.00));
/// ```
pub fn aggregate(items: &[LineItem]) -> DocumentTotals {
    let mut gross_total_raw = Decimal::ZERO;
    let mut buckets: Vec<Bucket> = Vec::new();

    for item in items {
        let gross = item.effective_gross();
        gross_total_raw += gross;

        let key = item.vat_mode.rate_key();
        let index = match buckets.iter().position(|b| b.key == key) {
            Some(index) => index,
            None => {
                buckets.push(Bucket::new(key));
                buckets.len() - 1
            }
        };
        let bucket = &mut buckets[index];
        bucket.gross += gross;

        // Positions without a usable gross amount contribute nothing, not
        // even their recorded VAT.
        match (item.vat_mode, item.bounded_gross()) {
            (VatMode::LegacyPrecomputed(vat), Some(_)) if vat.abs() <= MAX_AMOUNT => {
                bucket.precomputed_vat += vat;
            }
            _ => {}
        }
    }

    let groups: Vec<VatGroup> = buckets.into_iter().map(Bucket::close).collect();

    // Sum of the already rounded group amounts, as printed per rate on an invoice.
    let vat_total: Decimal = groups.iter().map(|g| g.vat_sum).sum();
    let gross_total = round_currency(gross_total_raw);
    let net_total = round_currency(gross_total_raw - vat_total);

    debug!(
        positions = items.len(),
        groups = groups.len(),
        %gross_total,
        %vat_total,
        %net_total,
        "aggregated VAT groups"
    );

    DocumentTotals {
        gross_total,
        vat_total,
        net_total,
        groups,
    }
}
