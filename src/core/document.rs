use chrono::NaiveDate;
use tracing::debug;

use super::aggregate::aggregate;
use super::resolver;
use super::types::*;

impl Document {
    /// A blank position with this document's defaults: goods, the kind's
    /// rate preset, not delivered, one piece for sales.
    pub fn new_line(&self, date: NaiveDate) -> LineItem {
        LineItem {
            date: Some(date),
            description: String::new(),
            quantity: (self.kind == DocumentKind::Sale).then_some(1),
            item_type: ItemType::Goods,
            gross: None,
            vat_mode: VatMode::ExplicitRate(self.kind.default_rate()),
            delivered: false,
            net: None,
            vat: None,
        }
    }

    /// Insert `line` at `index` (appended when past the end) and recompute.
    pub fn insert_line(&mut self, index: usize, line: LineItem) {
        let index = index.min(self.lines.len());
        self.lines.insert(index, line);
        self.recompute();
    }

    /// Append `line` and recompute.
    pub fn push_line(&mut self, line: LineItem) {
        self.lines.push(line);
        self.recompute();
    }

    /// Remove the position at `index` and recompute.
    pub fn remove_line(&mut self, index: usize) -> Option<LineItem> {
        if index >= self.lines.len() {
            return None;
        }
        let line = self.lines.remove(index);
        self.recompute();
        Some(line)
    }

    /// Mutable access for batch edits. Call [`Document::recompute`] afterwards.
    pub fn line_mut(&mut self, index: usize) -> Option<&mut LineItem> {
        self.lines.get_mut(index)
    }

    /// Apply `edit` to one position, then recompute.
    ///
    /// Returns `false` if there is no position at `index`.
    pub fn edit_line(&mut self, index: usize, edit: impl FnOnce(&mut LineItem)) -> bool {
        let Some(line) = self.lines.get_mut(index) else {
            return false;
        };
        edit(line);
        self.recompute();
        true
    }

    /// Re-derive every position and replace the totals.
    pub fn recompute(&mut self) {
        for line in &mut self.lines {
            resolver::derive_from_gross(line);
        }
        let totals = aggregate(&self.lines);
        debug!(
            kind = self.kind.label(),
            positions = self.lines.len(),
            "recomputed document totals"
        );
        self.totals = Some(totals);
    }

    /// Totals as of the last recompute.
    pub fn totals(&self) -> Option<&DocumentTotals> {
        self.totals.as_ref()
    }

    /// Whether the payment has a value date.
    pub fn is_settled(&self) -> bool {
        self.value_date.is_some()
    }

    /// Positions not delivered yet.
    pub fn open_lines(&self) -> impl Iterator<Item = &LineItem> {
        self.lines.iter().filter(|l| !l.delivered)
    }
}
