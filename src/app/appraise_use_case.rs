use std::path::Path;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::apis::ContractPriceSource;
use crate::error::{AppraiserError, Result};
use crate::records::{self, IntermediateRow};
use crate::report;
use crate::types::{Appraisal, ItemRecord, Valuation};
use crate::valuation::average_price;

/// Stage two: price every resolved item and total the lot.
pub struct AppraiseUseCase {
    prices: ContractPriceSource,
    delay: Duration,
}

impl AppraiseUseCase {
    pub fn new(prices: ContractPriceSource, delay: Duration) -> Self {
        Self { prices, delay }
    }

    /// Value a single item. Failures stay local to the item.
    pub async fn appraise_record(&self, record: ItemRecord) -> Valuation {
        let Some(type_id) = record.type_id else {
            warn!("Skipping {}, missing TypeID", record.name);
            return Valuation::unavailable(record);
        };

        info!("Fetching price for: {} (TypeID: {})", record.name, type_id);
        let valuation = match self.prices.fetch_samples(type_id).await {
            Ok(samples) => {
                let average = average_price(&samples);
                if average.is_none() {
                    warn!("All {} prices for {} deviate from the median", samples.len(), record.name);
                }
                Valuation::priced(record, average)
            }
            Err(e @ AppraiserError::NoPrices { .. }) => {
                warn!("{}: {}", record.name, e);
                Valuation::unavailable(record)
            }
            Err(e) => {
                error!("Error fetching {}: {}", record.name, e);
                Valuation::unavailable(record)
            }
        };

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        valuation
    }

    /// Value rows in order. Rows with a non-integer quantity are dropped.
    pub async fn appraise_rows(&self, rows: Vec<IntermediateRow>) -> Appraisal {
        let mut valuations = Vec::with_capacity(rows.len());
        for row in rows {
            let name = row.name.clone();
            let amount = row.amount.clone();
            let raw_type_id = row.type_id.clone();
            match row.into_record() {
                Ok(record) => {
                    let valuation = self.appraise_record(record).await;
                    valuations.push(valuation.with_type_id_text(&raw_type_id));
                }
                Err(_) => warn!("Skipping {}, invalid quantity: {}", name, amount),
            }
        }
        Appraisal::from_rows(valuations)
    }

    /// Read the intermediate CSV, appraise it, and write the report.
    pub async fn run(&self, input: &Path, output: &Path) -> Result<Appraisal> {
        info!("Reading input file {}", input.display());
        let rows = records::read_intermediate_file(input)?;

        let appraisal = self.appraise_rows(rows).await;

        info!("Writing results to {}", output.display());
        report::write_report_file(output, &appraisal)?;
        info!(
            "Appraised {} items, total {}",
            appraisal.rows.len(),
            report::format_isk_millions(appraisal.grand_total)
        );
        Ok(appraisal)
    }
}
