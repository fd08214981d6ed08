use crate::domain::order::{LineItem, Order, OrderId, Sku};
use crate::error::{OrderError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use std::io::Read;

/// One `order, sku, quantity, unit_price` row.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct OrderRow {
    pub order: u32,
    pub sku: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl OrderRow {
    fn into_line_item(self) -> Result<(OrderId, LineItem)> {
        let item = LineItem::new(Sku::new(self.sku), self.quantity, self.unit_price)?;
        Ok((OrderId(self.order), item))
    }
}

/// Orders assembled from a CSV source, plus the rows that could not be used.
#[derive(Debug, Default)]
pub struct ParsedOrders {
    pub orders: Vec<Order>,
    pub rejected: Vec<OrderError>,
}

/// Reads order line items from a CSV source.
///
/// Rows sharing an order id are merged into one order. Orders keep the position of their
/// first row, so processing follows the file. An order with any unusable row is dropped
/// whole, never processed with items missing.
pub struct OrderReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> OrderReader<R> {
    /// Creates a new `OrderReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        Self {
            reader: super::reader_builder().from_reader(source),
        }
    }

    /// Reads every row and assembles complete orders.
    pub fn orders(mut self) -> ParsedOrders {
        let mut parsed = ParsedOrders::default();
        let headers = match self.reader.headers() {
            Ok(headers) => headers.clone(),
            Err(e) => {
                parsed.rejected.push(e.into());
                return parsed;
            }
        };

        let mut positions: HashMap<OrderId, usize> = HashMap::new();
        let mut dropped: BTreeSet<OrderId> = BTreeSet::new();

        for record in self.reader.into_records() {
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    parsed.rejected.push(e.into());
                    continue;
                }
            };
            // The id is attributed even when the rest of the row is unusable.
            let id = record.get(0).and_then(|f| f.parse().ok()).map(OrderId);
            let row = record
                .deserialize::<OrderRow>(Some(&headers))
                .map_err(OrderError::from)
                .and_then(OrderRow::into_line_item);

            match row {
                Ok((id, item)) => {
                    if dropped.contains(&id) {
                        continue;
                    }
                    let index = *positions.entry(id).or_insert_with(|| {
                        parsed.orders.push(Order::new(id.0));
                        parsed.orders.len() - 1
                    });
                    let order = &mut parsed.orders[index];
                    order.items.push(item);
                    if let Err(e) = order.total() {
                        parsed.rejected.push(e);
                        dropped.insert(id);
                    }
                }
                Err(e) => {
                    parsed.rejected.push(e);
                    if let Some(id) = id {
                        dropped.insert(id);
                    }
                }
            }
        }

        for id in &dropped {
            parsed.rejected.push(OrderError::ValidationError(format!(
                "order {id} dropped: it has rejected rows"
            )));
        }
        parsed.orders.retain(|order| !dropped.contains(&order.id));
        parsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rows_group_by_order_in_file_order() {
        let data = "order, sku, quantity, unit_price\n\
                    2, BOOK, 1, 10.0\n\
                    1, PEN, 3, 1.5\n\
                    2, PEN, 2, 1.5";
        let parsed = OrderReader::new(data.as_bytes()).orders();

        assert!(parsed.rejected.is_empty());
        assert_eq!(parsed.orders.len(), 2);
        assert_eq!(parsed.orders[0].id, OrderId(2));
        assert_eq!(parsed.orders[0].items.len(), 2);
        assert_eq!(parsed.orders[0].total().unwrap(), dec!(13.0));
        assert_eq!(parsed.orders[1].id, OrderId(1));
        assert_eq!(parsed.orders[1].total().unwrap(), dec!(4.5));
    }

    #[test]
    fn test_rejected_row_drops_its_whole_order() {
        let data = "order, sku, quantity, unit_price\n\
                    1, BOOK, 2, 10.0\n\
                    2, CUP, 1, 2.0\n\
                    1, PEN, 0, 1.0\n\
                    3, MUG, lots, 4.0\n\
                    3, MUG, 1, 4.0\n\
                    x, PEN, 1, 1.0";
        let parsed = OrderReader::new(data.as_bytes()).orders();

        let ids: Vec<OrderId> = parsed.orders.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![OrderId(2)]);
        // three bad rows plus one notice per dropped order
        assert_eq!(parsed.rejected.len(), 5);
        assert!(
            parsed
                .rejected
                .iter()
                .any(|e| e.to_string().contains("order 1 dropped"))
        );
    }

    #[test]
    fn test_order_whose_total_overflows_is_dropped() {
        let data = "order, sku, quantity, unit_price\n\
                    1, X, 1, 79228162514264337593543950335\n\
                    1, Y, 1, 79228162514264337593543950335\n\
                    2, Z, 2, 50000000000000000000000000000.0\n\
                    3, PEN, 1, 1.0";
        let parsed = OrderReader::new(data.as_bytes()).orders();

        assert_eq!(parsed.orders.len(), 1);
        assert_eq!(parsed.orders[0].id, OrderId(3));
        assert_eq!(parsed.rejected.len(), 4);
    }
}
