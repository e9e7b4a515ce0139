use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::BilanzError;
use super::resolver;
use super::types::*;

/// Builder for purchase and sale documents.
///
/// ```
/// use perlenbilanz::core::*;
/// use rust_decimal_macros::dec;
///
/// let sale = DocumentBuilder::new(DocumentKind::Sale)
///     .platform("fancywork")
///     .payment_method("Konto")
///     .add_line(LineItemBuilder::new(ItemType::Goods)
///         .description("Perlenkette")
///         .gross(dec!(119.00))
///         .rate(VatRate::STANDARD)
///         .build())
///     .build()
///     .unwrap();
///
/// assert_eq!(sale.totals.unwrap().net_total, dec!(100.00));
/// ```
pub struct DocumentBuilder {
    kind: DocumentKind,
    invoice_year: Option<i32>,
    invoice_number: Option<u32>,
    platform: Option<String>,
    order_number: Option<String>,
    account: Option<String>,
    name: Option<String>,
    payment_method: Option<String>,
    value_date: Option<NaiveDate>,
    lines: Vec<LineItem>,
}

impl DocumentBuilder {
    pub fn new(kind: DocumentKind) -> Self {
        Self {
            kind,
            invoice_year: None,
            invoice_number: None,
            platform: None,
            order_number: None,
            account: None,
            name: None,
            payment_method: None,
            value_date: None,
            lines: Vec::new(),
        }
    }

    pub fn invoice(mut self, year: i32, number: u32) -> Self {
        self.invoice_year = Some(year);
        self.invoice_number = Some(number);
        self
    }

    pub fn platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    pub fn order_number(mut self, number: impl Into<String>) -> Self {
        self.order_number = Some(number.into());
        self
    }

    pub fn account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn payment_method(mut self, method: impl Into<String>) -> Self {
        self.payment_method = Some(method.into());
        self
    }

    pub fn value_date(mut self, date: NaiveDate) -> Self {
        self.value_date = Some(date);
        self
    }

    pub fn add_line(mut self, line: LineItem) -> Self {
        self.lines.push(line);
        self
    }

    /// Build the document, resolving every position and computing totals.
    pub fn build(self) -> Result<Document, BilanzError> {
        // Input limits to prevent abuse
        if self.lines.len() > 10_000 {
            return Err(BilanzError::Builder(
                "document cannot have more than 10,000 positions".into(),
            ));
        }
        if let Some(platform) = &self.platform {
            if platform.len() > 200 {
                return Err(BilanzError::Builder(
                    "platform cannot exceed 200 characters".into(),
                ));
            }
        }
        if let Some(number) = &self.order_number {
            if number.len() > 200 {
                return Err(BilanzError::Builder(
                    "order number cannot exceed 200 characters".into(),
                ));
            }
        }
        for line in &self.lines {
            if let Some(gross) = line.gross {
                check_amount(gross)?;
            }
            if let VatMode::LegacyPrecomputed(vat) = line.vat_mode {
                check_amount(vat)?;
            }
        }
        if self.invoice_number == Some(0) {
            return Err(BilanzError::Builder(
                "invoice numbers start at 1".into(),
            ));
        }

        let mut document = Document {
            kind: self.kind,
            invoice_year: self.invoice_year,
            invoice_number: self.invoice_number,
            platform: self.platform,
            order_number: self.order_number,
            account: self.account,
            name: self.name,
            payment_method: self.payment_method,
            value_date: self.value_date,
            lines: self.lines,
            totals: None,
        };
        document.recompute();
        Ok(document)
    }
}

/// Builder for a single position.
///
/// The built item has `net` and `vat` already derived.
pub struct LineItemBuilder {
    date: Option<NaiveDate>,
    description: String,
    quantity: Option<u32>,
    item_type: ItemType,
    gross: Option<Decimal>,
    vat_mode: VatMode,
    delivered: bool,
}

impl LineItemBuilder {
    pub fn new(item_type: ItemType) -> Self {
        Self {
            date: None,
            description: String::new(),
            quantity: None,
            item_type,
            gross: None,
            vat_mode: VatMode::default(),
            delivered: false,
        }
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn gross(mut self, gross: Decimal) -> Self {
        self.gross = Some(gross);
        self
    }

    pub fn gross_opt(mut self, gross: Option<Decimal>) -> Self {
        self.gross = gross;
        self
    }

    pub fn rate(mut self, rate: VatRate) -> Self {
        self.vat_mode = VatMode::ExplicitRate(rate);
        self
    }

    pub fn vat_mode(mut self, mode: VatMode) -> Self {
        self.vat_mode = mode;
        self
    }

    pub fn delivered(mut self, delivered: bool) -> Self {
        self.delivered = delivered;
        self
    }

    pub fn build(self) -> LineItem {
        resolver::resolve_line_item(LineItem {
            date: self.date,
            description: self.description,
            quantity: self.quantity,
            item_type: self.item_type,
            gross: self.gross,
            vat_mode: self.vat_mode,
            delivered: self.delivered,
            net: None,
            vat: None,
        })
    }
}
