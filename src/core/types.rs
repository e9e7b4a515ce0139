use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::error::BilanzError;

/// Largest magnitude a gross or recorded VAT amount may have.
///
/// Positions beyond it are rejected on load and by [`DocumentBuilder`]; the
/// resolver and the aggregator treat them as having no gross amount.
///
/// [`DocumentBuilder`]: super::DocumentBuilder
pub const MAX_AMOUNT: Decimal = dec!(1000000000000);

/// Reject amounts whose magnitude exceeds [`MAX_AMOUNT`].
pub fn check_amount(amount: Decimal) -> Result<Decimal, BilanzError> {
    if amount.abs() > MAX_AMOUNT {
        return Err(BilanzError::AmountOutOfRange(amount));
    }
    Ok(amount)
}

/// A VAT percentage (MwStProzent) between [`VatRate::MIN_PERCENT`] and
/// [`VatRate::MAX_PERCENT`]. The gross-to-net divisor `1 + rate/100` is
/// therefore at least 0.01.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct VatRate(Decimal);

impl VatRate {
    /// 0%, no VAT.
    pub const ZERO: VatRate = VatRate(Decimal::ZERO);
    /// 7%, reduced German rate.
    pub const REDUCED: VatRate = VatRate(dec!(7));
    /// 19%, standard German rate. Also the rate implied by a legacy "VAT applied" flag.
    pub const STANDARD: VatRate = VatRate(dec!(19));

    /// Lowest accepted percentage.
    pub const MIN_PERCENT: Decimal = dec!(-99);
    /// Highest accepted percentage.
    pub const MAX_PERCENT: Decimal = dec!(1000);

    /// Validate a percentage. Rates outside `-99..=1000` are rejected.
    pub fn new(percent: Decimal) -> Result<Self, BilanzError> {
        if percent < Self::MIN_PERCENT || percent > Self::MAX_PERCENT {
            return Err(BilanzError::InvalidRate(percent));
        }
        Ok(Self(percent))
    }

    /// Rate implied by the legacy boolean `mwstStatus` flag.
    pub fn from_flag(applied: bool) -> Self {
        if applied { Self::STANDARD } else { Self::ZERO }
    }

    /// The percentage value (e.g. `19` for 19%).
    pub fn percent(&self) -> Decimal {
        self.0
    }

    /// `1 + rate/100`, the factor between net and gross.
    pub fn divisor(&self) -> Decimal {
        Decimal::ONE + self.0 / dec!(100)
    }
}

impl TryFrom<Decimal> for VatRate {
    type Error = BilanzError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<VatRate> for Decimal {
    fn from(rate: VatRate) -> Self {
        rate.0
    }
}

impl std::fmt::Display for VatRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}

/// How the VAT of a line item is determined.
///
/// Built once when a line item is loaded (see the mode resolution in
/// `RawLineItem::resolve_mode`) and never re-inspected from loose fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VatMode {
    /// A known percentage; net and VAT are derived from gross.
    ExplicitRate(VatRate),
    /// Legacy records: "VAT applied" flag, meaning 19% or 0%.
    LegacyFlag(bool),
    /// Legacy records: VAT amount captured at entry time, rate unknown.
    /// The amount is authoritative; net is `gross - vat`.
    LegacyPrecomputed(Decimal),
}

impl VatMode {
    /// The rate this mode derives net/VAT with, if it has a single one.
    pub fn effective_rate(&self) -> Option<VatRate> {
        match self {
            Self::ExplicitRate(rate) => Some(*rate),
            Self::LegacyFlag(applied) => Some(VatRate::from_flag(*applied)),
            Self::LegacyPrecomputed(_) => None,
        }
    }

    /// Bucket key used when grouping line items by VAT rate.
    pub fn rate_key(&self) -> RateKey {
        match self.effective_rate() {
            Some(rate) => RateKey::Rate(rate),
            None => RateKey::Mixed,
        }
    }
}

impl Default for VatMode {
    fn default() -> Self {
        Self::ExplicitRate(VatRate::ZERO)
    }
}

/// Kind of line item (Typ). Purchases and sales allow different subsets,
/// see [`DocumentKind::item_types`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ItemType {
    /// Ware.
    #[default]
    Goods,
    /// Versand.
    Shipping,
    /// Porto/Versandmaterial (purchases).
    ShippingMaterial,
    /// Büromaterial (purchases).
    OfficeSupplies,
    /// Aufschlag (sales).
    Surcharge,
    /// Rabatt (sales). Positive amounts are inverted when aggregating.
    Discount,
    /// Gebühren (purchases).
    Fees,
    /// Buchhaltung (purchases).
    Bookkeeping,
    /// Sonstige.
    Other,
}

impl ItemType {
    /// Label as stored in the bookkeeping records.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Goods => "Ware",
            Self::Shipping => "Versand",
            Self::ShippingMaterial => "Porto/Versandmaterial",
            Self::OfficeSupplies => "Büromaterial",
            Self::Surcharge => "Aufschlag",
            Self::Discount => "Rabatt",
            Self::Fees => "Gebühren",
            Self::Bookkeeping => "Buchhaltung",
            Self::Other => "Sonstige",
        }
    }

    /// Parse from a stored label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Ware" => Some(Self::Goods),
            "Versand" => Some(Self::Shipping),
            "Porto/Versandmaterial" => Some(Self::ShippingMaterial),
            "Büromaterial" => Some(Self::OfficeSupplies),
            "Aufschlag" => Some(Self::Surcharge),
            "Rabatt" => Some(Self::Discount),
            "Gebühren" => Some(Self::Fees),
            "Buchhaltung" => Some(Self::Bookkeeping),
            "Sonstige" => Some(Self::Other),
            _ => None,
        }
    }
}

/// Purchase (Einkauf) or sale (Verkauf).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    Purchase,
    Sale,
}

impl DocumentKind {
    /// Item types offered for this kind of document, in display order.
    pub fn item_types(&self) -> &'static [ItemType] {
        match self {
            Self::Purchase => &[
                ItemType::Goods,
                ItemType::Shipping,
                ItemType::ShippingMaterial,
                ItemType::OfficeSupplies,
                ItemType::Fees,
                ItemType::Bookkeeping,
                ItemType::Other,
            ],
            Self::Sale => &[
                ItemType::Goods,
                ItemType::Shipping,
                ItemType::Surcharge,
                ItemType::Discount,
                ItemType::Other,
            ],
        }
    }

    /// Whether `item_type` belongs to this kind's item type list.
    pub fn allows(&self, item_type: ItemType) -> bool {
        self.item_types().contains(&item_type)
    }

    /// VAT rate preset on newly added lines.
    pub fn default_rate(&self) -> VatRate {
        match self {
            Self::Purchase => VatRate::ZERO,
            Self::Sale => VatRate::STANDARD,
        }
    }

    /// German label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Purchase => "Einkauf",
            Self::Sale => "Verkauf",
        }
    }
}

/// One position of a purchase or sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Position date (Datum).
    pub date: Option<NaiveDate>,
    /// Free text (Bezeichnung).
    pub description: String,
    /// Piece count (Stück), only recorded for sales.
    pub quantity: Option<u32>,
    /// Item type.
    pub item_type: ItemType,
    /// Gross amount (Brutto). `None` when not entered yet.
    pub gross: Option<Decimal>,
    /// How VAT is determined for this position.
    pub vat_mode: VatMode,
    /// Whether the goods were delivered (geliefert).
    pub delivered: bool,
    /// Net amount (Netto), derived. Unrounded.
    pub net: Option<Decimal>,
    /// VAT amount (MwSt), derived. Unrounded.
    pub vat: Option<Decimal>,
}

impl LineItem {
    /// Gross amount, unless absent or beyond [`MAX_AMOUNT`].
    pub fn bounded_gross(&self) -> Option<Decimal> {
        self.gross.filter(|g| g.abs() <= MAX_AMOUNT)
    }

    /// Gross amount as it enters aggregation: 0 when absent or out of range,
    /// negated for positive discounts.
    pub fn effective_gross(&self) -> Decimal {
        let gross = self.bounded_gross().unwrap_or(Decimal::ZERO);
        if self.item_type == ItemType::Discount && gross > Decimal::ZERO {
            -gross
        } else {
            gross
        }
    }
}

/// Key of a VAT group: a single rate, or the bucket for legacy positions
/// whose rate is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RateKey {
    Rate(VatRate),
    Mixed,
}

impl std::fmt::Display for RateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rate(rate) => rate.fmt(f),
            Self::Mixed => f.write_str("diverse"),
        }
    }
}

/// Aggregated figures of all positions sharing one [`RateKey`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VatGroup {
    pub rate_key: RateKey,
    /// Sum of sign-adjusted gross amounts.
    pub gross_sum: Decimal,
    /// Group VAT, rounded to cents.
    pub vat_sum: Decimal,
    /// `gross_sum - vat_sum`.
    pub net_sum: Decimal,
}

/// Headline figures of a purchase or sale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentTotals {
    /// Rounded sum of all sign-adjusted gross amounts.
    pub gross_total: Decimal,
    /// Sum of the per-group rounded VAT amounts.
    pub vat_total: Decimal,
    /// `gross_total - vat_total`.
    pub net_total: Decimal,
    /// VAT groups in order of first appearance.
    pub groups: Vec<VatGroup>,
}

impl DocumentTotals {
    /// Group for `key`, if any position used it.
    pub fn group(&self, key: RateKey) -> Option<&VatGroup> {
        self.groups.iter().find(|g| g.rate_key == key)
    }
}

/// Purchase or sale header with its positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub kind: DocumentKind,
    /// Invoice year (Rechnungsjahr).
    pub invoice_year: Option<i32>,
    /// Invoice number within the year (Rechnungsnummer). Allocated externally.
    pub invoice_number: Option<u32>,
    /// Marketplace or shop (Plattform).
    pub platform: Option<String>,
    /// Order number on the platform (Bestellnummer).
    pub order_number: Option<String>,
    /// Customer or supplier account on the platform.
    pub account: Option<String>,
    /// Customer or supplier name.
    pub name: Option<String>,
    /// Payment method (Zahlweise).
    pub payment_method: Option<String>,
    /// Value date (Wertstellung). `None` while the payment is not settled.
    pub value_date: Option<NaiveDate>,
    pub lines: Vec<LineItem>,
    /// Set by [`Document::recompute`].
    pub totals: Option<DocumentTotals>,
}
