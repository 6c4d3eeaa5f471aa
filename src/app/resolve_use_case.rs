use std::path::Path;
use tracing::{error, info, warn};

use crate::apis::TypeIdLookup;
use crate::error::Result;
use crate::records::{self, parse_quantity, InputLine};
use crate::types::ItemRecord;

/// Stage one: turn `name<TAB>amount` lines into records carrying a TypeID.
pub struct ResolveUseCase {
    lookup: TypeIdLookup,
}

impl ResolveUseCase {
    pub fn new(lookup: TypeIdLookup) -> Self {
        Self { lookup }
    }

    /// Look up one line. `None` when the quantity is not an integer.
    pub async fn resolve_line(&self, line: &InputLine) -> Option<ItemRecord> {
        let quantity = match parse_quantity(&line.amount) {
            Ok(q) => q,
            Err(e) => {
                warn!("Skipping {}: {}", line.name, e);
                return None;
            }
        };

        let type_id = match self.lookup.resolve(&line.name).await {
            Ok(Some(id)) => Some(id),
            Ok(None) => {
                warn!("No TypeID found for {}", line.name);
                None
            }
            Err(e) => {
                error!("Error fetching TypeID for {}: {}", line.name, e);
                None
            }
        };

        Some(ItemRecord {
            name: line.name.clone(),
            quantity,
            type_id,
        })
    }

    /// Resolve every line in input order, one request at a time.
    pub async fn resolve_all(&self, lines: &[InputLine]) -> Vec<ItemRecord> {
        let mut records = Vec::with_capacity(lines.len());
        for line in lines {
            if let Some(record) = self.resolve_line(line).await {
                records.push(record);
            }
        }
        records
    }

    /// Read the input list, resolve it, and write the intermediate CSV.
    pub async fn run(&self, input: &Path, output: &Path) -> Result<Vec<ItemRecord>> {
        let lines = records::read_input_list(input)?;
        info!("Resolving {} items from {}", lines.len(), input.display());

        let resolved = self.resolve_all(&lines).await;
        records::write_intermediate_file(output, &resolved)?;

        let found = resolved.iter().filter(|r| r.type_id.is_some()).count();
        info!(
            "{} created ({} of {} TypeIDs found)",
            output.display(),
            found,
            resolved.len()
        );
        Ok(resolved)
    }
}
