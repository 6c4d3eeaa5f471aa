/// TypeID of an item in the EVE static data catalog
pub type TypeId = u64;

/// An item to appraise, as carried from the resolver to the reporter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRecord {
    pub name: String,
    pub quantity: i64,
    pub type_id: Option<TypeId>,
}

/// A single price scraped from the history page, in absolute ISK
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct PriceSample(pub f64);

impl PriceSample {
    pub fn isk(self) -> f64 {
        self.0
    }
}

/// Appraisal outcome for one item. `None` renders as "N/A".
#[derive(Debug, Clone, PartialEq)]
pub struct Valuation {
    pub record: ItemRecord,
    /// Filtered average unit price in ISK
    pub average_price: Option<f64>,
    /// `average_price * quantity` in ISK
    pub total_value: Option<f64>,
    /// TypeID column as it appears in the report
    pub type_id_text: String,
}

fn type_id_text(record: &ItemRecord) -> String {
    record.type_id.map(|id| id.to_string()).unwrap_or_default()
}

impl Valuation {
    pub fn unavailable(record: ItemRecord) -> Self {
        Self {
            type_id_text: type_id_text(&record),
            record,
            average_price: None,
            total_value: None,
        }
    }

    /// Build from an average unit price. Zero prices and zero totals are
    /// reported as unavailable.
    pub fn priced(record: ItemRecord, average_price: Option<f64>) -> Self {
        let average_price = average_price.filter(|p| *p != 0.0);
        let total_value = average_price
            .map(|p| p * record.quantity as f64)
            .filter(|t| *t != 0.0);
        Self {
            type_id_text: type_id_text(&record),
            record,
            average_price,
            total_value,
        }
    }

    /// Report the TypeID exactly as read, e.g. a malformed value that was
    /// treated as missing.
    pub fn with_type_id_text(mut self, raw: &str) -> Self {
        self.type_id_text = raw.to_string();
        self
    }
}

/// Every valuation in input order plus the grand total
#[derive(Debug, Clone, PartialEq)]
pub struct Appraisal {
    pub rows: Vec<Valuation>,
    pub grand_total: f64,
}

impl Appraisal {
    pub fn from_rows(rows: Vec<Valuation>) -> Self {
        let grand_total = rows
            .iter()
            .filter_map(|v| v.total_value)
            .fold(0.0, |acc, total| acc + total);
        Self { rows, grand_total }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(quantity: i64) -> ItemRecord {
        ItemRecord {
            name: "Tritanium".to_string(),
            quantity,
            type_id: Some(34),
        }
    }

    #[test]
    fn priced_multiplies_by_quantity() {
        let v = Valuation::priced(record(500), Some(5_250_000.0));
        assert_eq!(v.average_price, Some(5_250_000.0));
        assert_eq!(v.total_value, Some(2_625_000_000.0));
    }

    #[test]
    fn zero_quantity_keeps_average_but_drops_total() {
        let v = Valuation::priced(record(0), Some(1_000.0));
        assert_eq!(v.average_price, Some(1_000.0));
        assert_eq!(v.total_value, None);
    }

    #[test]
    fn grand_total_sums_only_computable_rows() {
        let rows = vec![
            Valuation::priced(record(2), Some(100.0)),
            Valuation::unavailable(record(7)),
            Valuation::priced(record(3), Some(10.0)),
            Valuation::priced(record(3), None),
        ];
        let appraisal = Appraisal::from_rows(rows);
        assert_eq!(appraisal.grand_total, 230.0);
        assert_eq!(appraisal.rows.len(), 4);
    }
}
