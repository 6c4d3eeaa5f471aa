use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use tracing::warn;

use crate::constants::INTERMEDIATE_HEADER;
use crate::error::{AppraiserError, Result};
use crate::types::{ItemRecord, TypeId};

/// One `name<TAB>amount` line of the input list, still unparsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLine {
    pub name: String,
    pub amount: String,
}

/// Split the tab-separated input list. Lines with fewer than two fields are ignored.
pub fn parse_input_list(text: &str) -> Vec<InputLine> {
    text.lines()
        .filter_map(|line| {
            let mut parts = line.trim().split('\t');
            let name = parts.next()?.trim();
            let amount = parts.next()?.trim();
            Some(InputLine {
                name: name.to_string(),
                amount: amount.to_string(),
            })
        })
        .collect()
}

pub fn read_input_list<P: AsRef<Path>>(path: P) -> Result<Vec<InputLine>> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse_input_list(&text))
}

pub fn parse_quantity(raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|e| AppraiserError::Parse(format!("invalid quantity '{}': {}", raw, e)))
}

/// A row of the intermediate `Name,Amount,TypeID` file, fields as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntermediateRow {
    pub name: String,
    pub amount: String,
    pub type_id: String,
}

impl IntermediateRow {
    /// Parse quantity and TypeID. A bad quantity rejects the row; a TypeID
    /// that is blank or not an integer becomes `None`.
    pub fn into_record(self) -> Result<ItemRecord> {
        let quantity = parse_quantity(&self.amount)?;
        let raw_id = self.type_id.trim();
        let type_id = if raw_id.is_empty() {
            None
        } else {
            match raw_id.parse::<TypeId>() {
                Ok(id) => Some(id),
                Err(_) => {
                    warn!("Ignoring malformed TypeID '{}' for {}", raw_id, self.name);
                    None
                }
            }
        };
        Ok(ItemRecord {
            name: self.name,
            quantity,
            type_id,
        })
    }
}

/// Read the intermediate CSV by column position, skipping the header row.
pub fn read_intermediate<R: Read>(reader: R) -> Result<Vec<IntermediateRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let field = |i: usize| record.get(i).unwrap_or("").to_string();
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        rows.push(IntermediateRow {
            name: field(0).trim().to_string(),
            amount: field(1),
            type_id: field(2),
        });
    }
    Ok(rows)
}

pub fn read_intermediate_file<P: AsRef<Path>>(path: P) -> Result<Vec<IntermediateRow>> {
    let file = File::open(path)?;
    read_intermediate(file)
}

/// Header plus one row per record; a missing TypeID is written as an empty field.
pub fn write_intermediate<W: Write>(writer: W, records: &[ItemRecord]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);

    wtr.write_record(INTERMEDIATE_HEADER)?;
    for record in records {
        let quantity = record.quantity.to_string();
        let type_id = record.type_id.map(|id| id.to_string()).unwrap_or_default();
        wtr.write_record([record.name.as_str(), quantity.as_str(), type_id.as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_intermediate_file<P: AsRef<Path>>(path: P, records: &[ItemRecord]) -> Result<()> {
    let file = File::create(path)?;
    write_intermediate(file, records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_list_skips_blank_and_short_lines() {
        let text = "Tritanium\t500\n\nPyerite\n  Mexallon \t 12 \nIsogen\t3\textra\n";
        let lines = parse_input_list(text);
        assert_eq!(
            lines,
            vec![
                InputLine { name: "Tritanium".into(), amount: "500".into() },
                InputLine { name: "Mexallon".into(), amount: "12".into() },
                InputLine { name: "Isogen".into(), amount: "3".into() },
            ]
        );
    }

    #[test]
    fn quantity_must_be_an_integer() {
        assert_eq!(parse_quantity(" 42 ").unwrap(), 42);
        assert!(parse_quantity("4.5").is_err());
        assert!(parse_quantity("1,000").is_err());
        assert!(parse_quantity("").is_err());
    }

    #[test]
    fn intermediate_round_trip() {
        let records = vec![
            ItemRecord { name: "Tritanium".into(), quantity: 500, type_id: Some(34) },
            ItemRecord { name: "Unknown, Thing".into(), quantity: 2, type_id: None },
            ItemRecord { name: "Nocxium".into(), quantity: 7, type_id: Some(38) },
        ];

        let mut buf = Vec::new();
        write_intermediate(&mut buf, &records).unwrap();

        let text = String::from_utf8(buf.clone()).unwrap();
        assert!(text.starts_with("Name,Amount,TypeID\r\n"));

        let read_back: Vec<ItemRecord> = read_intermediate(buf.as_slice())
            .unwrap()
            .into_iter()
            .map(|row| row.into_record().unwrap())
            .collect();
        assert_eq!(read_back, records);
    }

    #[test]
    fn short_rows_are_tolerated() {
        let text = "Name,Amount,TypeID\nTritanium,500\nPyerite,abc,35\n";
        let rows = read_intermediate(text.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].type_id, "");
        assert_eq!(rows[0].clone().into_record().unwrap().type_id, None);
        assert!(rows[1].clone().into_record().is_err());
    }

    #[test]
    fn malformed_type_id_is_treated_as_missing() {
        let row = IntermediateRow {
            name: "Tritanium".into(),
            amount: "1".into(),
            type_id: "thirty-four".into(),
        };
        assert_eq!(row.into_record().unwrap().type_id, None);
    }
}
