pub mod beverage;
pub mod catalog;
pub mod cli;
pub mod coffee_maker;
pub mod config;
pub mod constants;
pub mod container;
pub mod dispenser;
pub mod errors;
pub mod ingredient;
pub mod inventory;
pub mod low_stock;
pub mod notifications;
pub mod order;
pub mod orders_queue;
pub mod orders_reader;
pub mod outlets;
pub mod persistence;
pub mod statistics;

use std::{env, io, process, sync::Arc};

use log::{error, info, LevelFilter};
use simple_logger::SimpleLogger;

use cli::Cli;
use coffee_maker::CoffeeMaker;
use config::MachineConfig;
use constants::{CONFIG_FILE, N_CUSTOMERS};
use errors::MachineError;

/// Argumentos: `[--config <archivo>] [--orders <archivo>]`
struct Args {
    config: String,
    orders: Option<String>,
}

fn parse_args() -> Result<Args, MachineError> {
    let mut args = Args {
        config: CONFIG_FILE.to_string(),
        orders: None,
    };
    let mut iter = env::args().skip(1);
    while let Some(arg) = iter.next() {
        let value = iter
            .next()
            .ok_or_else(|| MachineError::InvalidConfiguration(format!("missing value for {}", arg)))?;
        match arg.as_str() {
            "--config" => args.config = value,
            "--orders" => args.orders = Some(value),
            _ => {
                return Err(MachineError::InvalidConfiguration(format!(
                    "unknown argument {}",
                    arg
                )))
            }
        }
    }
    Ok(args)
}

fn run() -> Result<(), MachineError> {
    let args = parse_args()?;
    let config = MachineConfig::load(&args.config)?;
    let machine = Arc::new(CoffeeMaker::start(config)?);

    match args.orders {
        Some(path) => {
            let orders = orders_reader::read_orders_from_file(path)?;
            let summary = orders_reader::serve_orders(machine.clone(), orders, N_CUSTOMERS)?;
            let counters = machine.statistics()?;
            info!(
                "[MACHINE] Batch finished, {} accepted and {} rejected, at most {} pouring at once",
                summary.accepted, summary.rejected, counters.peak_pouring
            );
        }
        None => {
            println!("Welcome to Chai Point!\n");
            let stdin = io::stdin();
            Cli::new(&machine, stdin.lock(), io::stdout()).run()?;
            println!("\nStopping the machine...");
        }
    }

    let shutdown = machine.shutdown()?;
    info!(
        "[MACHINE] Stopped with {} ingredients",
        shutdown.state.ingredients.len()
    );
    for notification in shutdown.notifications {
        println!("{}", notification);
    }
    if shutdown.saved.is_err() {
        println!("Unable to save machine state");
    }
    Ok(())
}

fn main() {
    if let Err(e) = SimpleLogger::new().with_level(LevelFilter::Info).env().init() {
        eprintln!("Could not start the logger: {}", e);
    }

    if let Err(e) = run() {
        error!("{}", e);
        process::exit(1);
    }
}
