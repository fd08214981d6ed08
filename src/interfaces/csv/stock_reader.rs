use crate::domain::order::Sku;
use crate::error::{OrderError, Result};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone)]
struct StockRow {
    sku: String,
    available: u32,
}

/// Reads `sku, available` stock levels from a CSV source.
pub struct StockReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> StockReader<R> {
    /// Creates a new `StockReader` from any `Read` source.
    pub fn new(source: R) -> Self {
        Self {
            reader: super::reader_builder().from_reader(source),
        }
    }

    /// Returns an iterator that lazily reads `(sku, available)` pairs.
    pub fn levels(self) -> impl Iterator<Item = Result<(Sku, u32)>> {
        self.reader.into_deserialize().map(|result| {
            result
                .map(|row: StockRow| (Sku::new(row.sku), row.available))
                .map_err(OrderError::from)
        })
    }
}
