//! Stored position records as loaded from the host, before the VAT mode is
//! decided.
//!
//! Old records carry a boolean `mwstStatus` or a pre-computed `mwst` amount
//! instead of a rate. Whether a field is missing, `null`, an empty string or
//! a number decides the VAT mode, so [`RawAmount`] keeps those apart.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use tracing::warn;

use super::amount::{parse_amount, parse_percent};
use crate::core::{
    BilanzError, DocumentKind, ItemType, LineItem, VatMode, VatRate, check_amount,
    resolve_line_item,
};

/// A numeric field of a stored record.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RawAmount {
    /// Key not present.
    #[default]
    Absent,
    /// Explicit `null`.
    Null,
    /// Empty text.
    Blank,
    /// A number, or text that parses as an amount.
    Value(Decimal),
    /// Text that is not an amount, including whitespace-only text.
    Invalid(String),
}

impl RawAmount {
    /// Classify the text of an amount field.
    pub fn from_text(text: &str) -> Self {
        Self::classify(text, parse_amount)
    }

    /// Classify the text of a rate field. Unlike amounts, `7.125` reads as
    /// 7.125%, not as a thousands group.
    pub fn from_rate_text(text: &str) -> Self {
        Self::classify(text, parse_percent)
    }

    fn classify(text: &str, parse: fn(&str) -> Result<Option<Decimal>, BilanzError>) -> Self {
        if text.is_empty() {
            return Self::Blank;
        }
        match parse(text) {
            Ok(Some(value)) => Self::Value(value),
            Ok(None) | Err(_) => Self::Invalid(text.to_string()),
        }
    }

    /// The numeric value, if there is one.
    pub fn value(&self) -> Option<Decimal> {
        match self {
            Self::Value(v) => Some(*v),
            _ => None,
        }
    }

    /// Present but empty: `null` or `""`.
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Null | Self::Blank)
    }

    fn deserialize_with<'de, D: Deserializer<'de>>(
        deserializer: D,
        from_text: fn(&str) -> Self,
    ) -> Result<Self, D::Error> {
        Ok(match Option::<AmountRepr>::deserialize(deserializer)? {
            None => Self::Null,
            Some(AmountRepr::Number(v)) => Self::Value(v),
            Some(AmountRepr::Text(s)) => from_text(&s),
        })
    }
}

impl From<Decimal> for RawAmount {
    fn from(value: Decimal) -> Self {
        Self::Value(value)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AmountRepr {
    Text(String),
    Number(Decimal),
}

impl<'de> Deserialize<'de> for RawAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Self::deserialize_with(deserializer, Self::from_text)
    }
}

fn deserialize_rate<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RawAmount, D::Error> {
    RawAmount::deserialize_with(deserializer, RawAmount::from_rate_text)
}

/// One stored position of a purchase or sale.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawLineItem {
    #[serde(rename = "datum")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "typ")]
    pub item_type: Option<String>,
    #[serde(rename = "bezeichnung")]
    pub description: Option<String>,
    #[serde(rename = "stueck")]
    pub quantity: Option<u32>,
    #[serde(rename = "brutto")]
    pub gross: RawAmount,
    #[serde(rename = "mwstProzent", deserialize_with = "deserialize_rate")]
    pub rate: RawAmount,
    /// Pre-computed VAT amount of legacy records.
    #[serde(rename = "mwst")]
    pub legacy_vat: RawAmount,
    /// "VAT applied" flag of legacy records.
    #[serde(rename = "mwstStatus")]
    pub legacy_flag: Option<bool>,
    #[serde(rename = "geliefert")]
    pub delivered: Option<bool>,
}

impl RawLineItem {
    /// Decide the VAT mode. First match wins:
    ///
    /// 1. a numeric rate → [`VatMode::ExplicitRate`]
    /// 2. a blank or `null` rate with a recorded VAT amount → [`VatMode::LegacyPrecomputed`]
    /// 3. a legacy flag → [`VatMode::LegacyFlag`]
    /// 4. otherwise 0%
    ///
    /// Fails for rates outside the [`VatRate`] domain and for recorded VAT
    /// amounts beyond [`MAX_AMOUNT`](crate::core::MAX_AMOUNT).
    pub fn resolve_mode(&self) -> Result<VatMode, BilanzError> {
        if let Some(percent) = self.rate.value() {
            return Ok(VatMode::ExplicitRate(VatRate::new(percent)?));
        }
        if let RawAmount::Invalid(text) = &self.rate {
            warn!(rate = %text, "ignoring unparsable VAT rate");
        }

        if self.rate.is_blank() {
            if let Some(vat) = self.legacy_vat.value() {
                return Ok(VatMode::LegacyPrecomputed(check_amount(vat)?));
            }
        }

        if let Some(applied) = self.legacy_flag {
            return Ok(VatMode::LegacyFlag(applied));
        }

        Ok(VatMode::default())
    }

    /// Build a resolved position for a document of `kind`.
    pub fn into_line_item(self, kind: DocumentKind) -> Result<LineItem, BilanzError> {
        let vat_mode = self.resolve_mode()?;

        let item_type = match self.item_type.as_deref() {
            None | Some("") => ItemType::default(),
            Some(label) => ItemType::from_label(label).unwrap_or_else(|| {
                warn!(label, "unknown item type, using Sonstige");
                ItemType::Other
            }),
        };
        if !kind.allows(item_type) {
            warn!(
                item_type = item_type.label(),
                kind = kind.label(),
                "item type not offered for this document kind"
            );
        }

        let gross = match self.gross {
            RawAmount::Value(v) => Some(check_amount(v)?),
            RawAmount::Invalid(text) => {
                warn!(gross = %text, "ignoring unparsable gross amount");
                None
            }
            _ => None,
        };

        Ok(resolve_line_item(LineItem {
            date: self.date,
            description: self.description.unwrap_or_default(),
            quantity: self.quantity,
            item_type,
            gross,
            vat_mode,
            delivered: self.delivered.unwrap_or(false),
            net: None,
            vat: None,
        }))
    }
}

/// Resolve all stored positions of one document.
pub fn load_lines(
    kind: DocumentKind,
    raw: impl IntoIterator<Item = RawLineItem>,
) -> Result<Vec<LineItem>, BilanzError> {
    raw.into_iter().map(|r| r.into_line_item(kind)).collect()
}
