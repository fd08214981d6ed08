//! CSV inputs for the command line: orders to process and inventory stock levels.

pub mod order_reader;
pub mod stock_reader;

fn reader_builder() -> ::csv::ReaderBuilder {
    let mut builder = ::csv::ReaderBuilder::new();
    builder.trim(::csv::Trim::All).flexible(true);
    builder
}
