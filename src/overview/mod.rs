//! Rollup across documents: settled totals per kind and open positions.
//!
//! Only documents with a value date count towards the settled figures; the
//! rest are listed separately so their payment can be booked.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{Document, DocumentKind, LineItem};

/// Sums of settled documents of one kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KindSummary {
    pub gross: Decimal,
    pub vat: Decimal,
    pub net: Decimal,
    /// Documents with a value date.
    pub settled: usize,
    /// Documents without a value date.
    pub unsettled: usize,
}

/// Settled purchase and sales figures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    pub purchases: KindSummary,
    pub sales: KindSummary,
}

impl Overview {
    /// Sum the totals of all settled documents.
    ///
    /// Documents whose totals were never computed count as zero.
    pub fn from_documents<'a>(documents: impl IntoIterator<Item = &'a Document>) -> Self {
        let mut overview = Self::default();
        for doc in documents {
            let summary = match doc.kind {
                DocumentKind::Purchase => &mut overview.purchases,
                DocumentKind::Sale => &mut overview.sales,
            };
            if !doc.is_settled() {
                summary.unsettled += 1;
                continue;
            }
            summary.settled += 1;
            if let Some(totals) = doc.totals() {
                summary.gross += totals.gross_total;
                summary.vat += totals.vat_total;
                summary.net += totals.net_total;
            }
        }
        overview
    }

    /// Sales minus purchases, gross.
    pub fn gross_balance(&self) -> Decimal {
        self.sales.gross - self.purchases.gross
    }

    /// VAT collected on sales minus VAT paid on purchases.
    pub fn vat_balance(&self) -> Decimal {
        self.sales.vat - self.purchases.vat
    }
}

/// An undelivered position and the index of its document.
#[derive(Debug, Clone, Copy)]
pub struct OpenPosition<'a> {
    pub document: usize,
    pub line: &'a LineItem,
}

/// All undelivered positions of `documents` of the given kind.
pub fn open_positions(documents: &[Document], kind: DocumentKind) -> Vec<OpenPosition<'_>> {
    documents
        .iter()
        .enumerate()
        .filter(|(_, doc)| doc.kind == kind)
        .flat_map(|(index, doc)| {
            doc.open_lines().map(move |line| OpenPosition {
                document: index,
                line,
            })
        })
        .collect()
}

/// Documents still waiting for a value date.
pub fn missing_value_date(documents: &[Document]) -> Vec<&Document> {
    documents.iter().filter(|d| !d.is_settled()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn doc(kind: DocumentKind, gross: Decimal, settled: bool) -> Document {
        let mut builder = DocumentBuilder::new(kind).add_line(
            LineItemBuilder::new(ItemType::Goods)
                .gross(gross)
                .rate(VatRate::STANDARD)
                .build(),
        );
        if settled {
            builder = builder.value_date(date(2013, 7, 1));
        }
        builder.build().unwrap()
    }

    #[test]
    fn only_settled_documents_count() {
        let docs = vec![
            doc(DocumentKind::Sale, dec!(119), true),
            doc(DocumentKind::Sale, dec!(238), false),
            doc(DocumentKind::Purchase, dec!(59.50), true),
        ];
        let o = Overview::from_documents(&docs);
        assert_eq!(o.sales.gross, dec!(119.00));
        assert_eq!(o.sales.vat, dec!(19.00));
        assert_eq!(o.sales.settled, 1);
        assert_eq!(o.sales.unsettled, 1);
        assert_eq!(o.purchases.net, dec!(50.00));
        assert_eq!(o.gross_balance(), dec!(59.50));
        assert_eq!(o.vat_balance(), dec!(9.50));
    }

    #[test]
    fn empty_overview() {
        let o = Overview::from_documents(&[]);
        assert_eq!(o, Overview::default());
    }

    #[test]
    fn lists_missing_value_dates() {
        let docs = vec![
            doc(DocumentKind::Sale, dec!(1), true),
            doc(DocumentKind::Purchase, dec!(2), false),
        ];
        let missing = missing_value_date(&docs);
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].kind, DocumentKind::Purchase);
    }
}
