//! Modo batch: lee una lista de pedidos y la despacha con varios clientes en paralelo
use log::{debug, error, info};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::thread;

use rand::seq::SliceRandom;
use rand::thread_rng;
use serde::Deserialize;

use crate::coffee_maker::CoffeeMaker;
use crate::errors::MachineError;
use crate::order::Order;
use crate::orders_queue::OrdersQueue;

#[derive(Deserialize)]
struct OrdersConfiguration {
    orders: Vec<String>,
}

/// Resultado de despachar todos los pedidos
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub accepted: usize,
    pub rejected: usize,
}

/// Lee los pedidos de `{"orders": ["coffee", ...]}` y los mezcla
pub fn read_orders_from_file<P: AsRef<Path>>(path: P) -> Result<OrdersQueue, MachineError> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| MachineError::FileReaderError(format!("{}: {}", path.display(), e)))?;
    let configuration: OrdersConfiguration = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| MachineError::FileReaderError(format!("{}: {}", path.display(), e)))?;
    Ok(orders_to_queue(configuration.orders))
}

fn orders_to_queue(mut beverages: Vec<String>) -> OrdersQueue {
    beverages.shuffle(&mut thread_rng());
    let mut queue = OrdersQueue::new();
    for (id, beverage) in beverages.iter().enumerate() {
        queue.push(Order::new(id, beverage));
        debug!("[READER] Added order {}", id);
    }
    info!("[READER] {} orders loaded", queue.len());
    queue
}

/// Reparte los pedidos entre `n_customers` hilos que le piden a la cafetera en simultaneo
pub fn serve_orders(
    machine: Arc<CoffeeMaker>,
    queue: OrdersQueue,
    n_customers: usize,
) -> Result<BatchSummary, MachineError> {
    let queue = Arc::new(Mutex::new(queue));
    let summary = Arc::new(Mutex::new(BatchSummary::default()));

    let customers: Vec<_> = (0..n_customers.max(1))
        .map(|id| {
            let machine = machine.clone();
            let queue = queue.clone();
            let summary = summary.clone();
            thread::spawn(move || customer(id, &machine, &queue, &summary))
        })
        .collect();

    for customer in customers {
        match customer.join() {
            Ok(result) => result?,
            Err(_) => error!("[CUSTOMER] A customer thread panicked"),
        }
    }
    machine.wait_for_pours()?;

    let summary = summary.lock()?;
    Ok(BatchSummary {
        accepted: summary.accepted,
        rejected: summary.rejected,
    })
}

fn customer(
    id: usize,
    machine: &CoffeeMaker,
    queue: &Mutex<OrdersQueue>,
    summary: &Mutex<BatchSummary>,
) -> Result<(), MachineError> {
    loop {
        let order = match queue.lock()?.pop() {
            Some(order) => order,
            None => return Ok(()),
        };
        debug!("[CUSTOMER {}] Orders {} ({})", id, order.beverage, order.id);
        match machine.serve(&order.beverage) {
            Ok(()) => summary.lock()?.accepted += 1,
            Err(e) => {
                info!("[CUSTOMER {}] Order {} rejected: {}", id, order.id, e);
                summary.lock()?.rejected += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::{config::MachineConfig, ingredient::Ingredient};

    #[test]
    fn should_read_every_order_from_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"orders": ["coffee", "hot water", "coffee"]}}"#).unwrap();

        let mut queue = read_orders_from_file(file.path()).unwrap();

        let mut beverages = Vec::new();
        while let Some(order) = queue.pop() {
            beverages.push(order.beverage);
        }
        beverages.sort();
        assert_eq!(vec!["coffee", "coffee", "hot water"], beverages);
    }

    #[test]
    fn should_serve_a_batch_with_more_customers_than_outlets() {
        let dir = tempfile::tempdir().unwrap();
        let machine = Arc::new(
            CoffeeMaker::start(MachineConfig {
                outlets: 2,
                pour_time_ms: 1,
                state_path: dir.path().join("machine.json"),
                ..MachineConfig::default()
            })
            .unwrap(),
        );
        let mut orders = vec!["hot water".to_string(); 25];
        orders.push("mocha".to_string());

        let summary = serve_orders(machine.clone(), orders_to_queue(orders), 6).unwrap();

        assert_eq!(BatchSummary { accepted: 20, rejected: 6 }, summary);
        assert_eq!(
            Some(&0),
            machine.list_ingredients().unwrap().get(&Ingredient::new("water"))
        );
        assert!(machine.statistics().unwrap().peak_pouring <= 2);
    }
}
