//! Dispenser de la cafetera. Admite los pedidos, reserva los ingredientes y sirve las bebidas.
use std::{
    sync::{Arc, Mutex},
    thread::{self, JoinHandle},
    time::Duration,
};

use log::{debug, error, info};

use crate::{
    beverage::Beverage,
    catalog::RecipeCatalog,
    errors::MachineError,
    inventory::{InventoryStore, Reservation},
    notifications::Notifier,
    outlets::{OutletSlot, Outlets},
    statistics::Statistics,
};

/// Programa los servidos sobre las salidas de la cafetera.
/// Nunca hay mas bebidas sirviendose que salidas: cada servido conserva su salida hasta terminar.
pub struct DispenseScheduler {
    outlets: Arc<Outlets>,
    inventory: Arc<InventoryStore>,
    catalog: Arc<RecipeCatalog>,
    notifier: Notifier,
    statistics: Arc<Statistics>,
    pour_time: Duration,
    pours: Mutex<Vec<JoinHandle<()>>>,
}

impl DispenseScheduler {
    pub fn new(
        n_outlets: usize,
        inventory: Arc<InventoryStore>,
        catalog: Arc<RecipeCatalog>,
        notifier: Notifier,
        statistics: Arc<Statistics>,
        pour_time: Duration,
    ) -> DispenseScheduler {
        DispenseScheduler {
            outlets: Arc::new(Outlets::new(n_outlets)),
            inventory,
            catalog,
            notifier,
            statistics,
            pour_time,
            pours: Mutex::new(Vec::new()),
        }
    }

    /// Espera una salida libre, reserva la receta y lanza el servido en segundo plano.
    /// Vuelve apenas se resuelve la reserva, sin esperar a que la bebida termine de servirse.
    pub fn serve(&self, beverage_name: &str) -> Result<(), MachineError> {
        let beverage = match self.catalog.lookup(beverage_name) {
            Some(beverage) => beverage.clone(),
            None => {
                self.statistics.rejected_unknown()?;
                return Err(MachineError::UnknownBeverage(beverage_name.to_string()));
            }
        };

        let slot = self.outlets.acquire()?;
        debug!("[DISPENSER] Outlet taken for {}", beverage.name());

        if let Reservation::Rejected(shortfalls) = self.inventory.check_and_reserve(beverage.recipe())? {
            drop(slot);
            info!(
                "[DISPENSER] Skipped {}, not enough {:?}",
                beverage.name(),
                shortfalls
            );
            self.statistics.rejected_for_stock()?;
            return Err(MachineError::InsufficientStock {
                beverage: beverage.name().to_string(),
                shortfalls,
            });
        }

        let pour = Pour {
            beverage,
            slot,
            notifier: self.notifier.clone(),
            statistics: self.statistics.clone(),
            pour_time: self.pour_time,
        };
        let handle = thread::spawn(move || {
            if let Err(e) = pour.run() {
                error!("[DISPENSER] Error while serving: {}", e);
            }
        });

        let mut pours = self.pours.lock()?;
        pours.retain(|pour| !pour.is_finished());
        pours.push(handle);
        Ok(())
    }

    /// Espera a que terminen todas las bebidas que se estan sirviendo.
    /// Un servido admitido conserva su salida hasta terminar, aunque todavia no este en `pours`.
    pub fn wait_for_pours(&self) -> Result<(), MachineError> {
        loop {
            let pending: Vec<JoinHandle<()>> = self.pours.lock()?.drain(..).collect();
            debug!("[DISPENSER] Waiting for {} pours", pending.len());
            for pour in pending {
                if pour.join().is_err() {
                    error!("[DISPENSER] A pour thread panicked");
                }
            }
            self.outlets.wait_all_free()?;
            if self.pours.lock()?.iter().all(|pour| pour.is_finished()) {
                break;
            }
        }
        // Los hilos que quedan ya terminaron
        for pour in self.pours.lock()?.drain(..) {
            if pour.join().is_err() {
                error!("[DISPENSER] A pour thread panicked");
            }
        }
        Ok(())
    }

    pub fn outlets(&self) -> &Outlets {
        &self.outlets
    }
}

/// Bebida reservada que se esta sirviendo. Libera su salida al terminar.
struct Pour {
    beverage: Beverage,
    slot: OutletSlot,
    notifier: Notifier,
    statistics: Arc<Statistics>,
    pour_time: Duration,
}

impl Pour {
    fn run(self) -> Result<(), MachineError> {
        self.statistics.pour_started()?;
        self.notifier.notify(format!("Serving {}", self.beverage.name()));
        thread::sleep(self.pour_time);
        self.notifier.notify(format!("Served {}", self.beverage.name()));
        self.statistics.pour_finished()?;
        drop(self.slot);
        Ok(())
    }
}
