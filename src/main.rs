use clap::Parser;
use miette::{IntoDiagnostic, Result};
use order_workflow::application::manager::{DEFAULT_MESSAGE, OrderManager};
use order_workflow::application::workflow::{AbortPolicy, CompensatingPolicy, FailurePolicy};
use order_workflow::domain::order::Order;
use order_workflow::domain::ports::{InventoryProcessorRef, OrderRepositoryRef};
use order_workflow::infrastructure::console::{ConsoleRef, StdoutConsole};
use order_workflow::infrastructure::in_memory::InMemoryOrderRepository;
use order_workflow::infrastructure::inventory::InMemoryInventory;
use order_workflow::infrastructure::notification::{EmailNotification, SmsNotification};
use order_workflow::infrastructure::payment::{ExpressPaymentProcessor, StandardPaymentProcessor};
use order_workflow::interfaces::csv::order_reader::OrderReader;
use order_workflow::interfaces::csv::stock_reader::StockReader;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const SEPARATOR: &str = "*******************";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Orders CSV file (order, sku, quantity, unit_price).
    /// Without it, one empty order is processed.
    orders: Option<PathBuf>,

    /// Stock levels CSV file (sku, available). SKUs not listed are always in stock.
    #[arg(long)]
    stock: Option<PathBuf>,

    /// Message sent to the customer once an order is processed.
    #[arg(long, default_value = DEFAULT_MESSAGE)]
    message: String,

    /// Refund the charge when a later step fails instead of leaving it in place.
    #[arg(long)]
    compensate: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Diagnostics go to stderr so stdout carries only the workflow lines.
    // Override the default level with RUST_LOG, e.g. RUST_LOG=order_workflow=debug
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let console: ConsoleRef = Arc::new(StdoutConsole);

    let mut levels = Vec::new();
    if let Some(path) = cli.stock {
        let file = File::open(path).into_diagnostic()?;
        for level in StockReader::new(file).levels() {
            match level {
                Ok(level) => levels.push(level),
                Err(e) => eprintln!("Error reading stock level: {}", e),
            }
        }
    }
    let inventory = InMemoryInventory::new(console.clone()).with_levels(levels);

    // Repository and inventory are shared by both managers.
    let inventory: InventoryProcessorRef = Arc::new(inventory);
    let repository: OrderRepositoryRef = Arc::new(InMemoryOrderRepository::new(console.clone()));
    let policy: Arc<dyn FailurePolicy> = if cli.compensate {
        Arc::new(CompensatingPolicy)
    } else {
        Arc::new(AbortPolicy)
    };

    let managers = [
        OrderManager::new(
            Arc::new(StandardPaymentProcessor::new(console.clone())),
            repository.clone(),
            Arc::new(EmailNotification::new(console.clone())),
            inventory.clone(),
        ),
        OrderManager::new(
            Arc::new(ExpressPaymentProcessor::new(console.clone())),
            repository,
            Arc::new(SmsNotification::new(console.clone())),
            inventory,
        ),
    ]
    .map(|manager| {
        manager
            .with_policy(policy.clone())
            .with_message(cli.message.clone())
    });

    let orders = match cli.orders {
        Some(path) => {
            let file = File::open(path).into_diagnostic()?;
            let parsed = OrderReader::new(file).orders();
            for e in parsed.rejected {
                eprintln!("Error reading order: {}", e);
            }
            parsed.orders
        }
        None => vec![Order::new(1)],
    };

    let mut first = true;
    for order in &orders {
        for manager in &managers {
            if !first {
                console.write_line(SEPARATOR).into_diagnostic()?;
            }
            first = false;

            // A failed run does not stop the remaining managers or orders.
            if let Err(e) = manager.process_order(order).await {
                eprintln!("Error processing order: {}", e);
            }
        }
    }

    Ok(())
}
