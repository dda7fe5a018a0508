//! Cafetera: arma el inventario y el catalogo al encenderse, atiende los pedidos y guarda su estado al apagarse.
use std::{collections::BTreeSet, sync::Arc};

use log::{error, info, warn};

use crate::{
    beverage::Beverage,
    catalog::{default_catalog, read_catalog_from_file, RecipeCatalog},
    config::MachineConfig,
    dispenser::DispenseScheduler,
    errors::MachineError,
    ingredient::Ingredient,
    inventory::{InventoryStore, Snapshot},
    low_stock::low_stock,
    notifications::NotificationStream,
    persistence::{load_state, save_state, MachineState},
    statistics::{report, Statistics, StatisticsCounters},
};

pub struct CoffeeMaker {
    config: MachineConfig,
    inventory: Arc<InventoryStore>,
    catalog: Arc<RecipeCatalog>,
    notifications: NotificationStream,
    statistics: Arc<Statistics>,
    dispenser: DispenseScheduler,
}

/// Resultado de apagar la cafetera
pub struct Shutdown {
    pub notifications: Vec<String>,
    pub state: MachineState,
    pub saved: Result<(), MachineError>,
}

impl CoffeeMaker {
    /// Enciende la cafetera con el catalogo configurado (o el de fabrica) y todos sus ingredientes llenos.
    /// Si se pide restaurar el estado, las cantidades guardadas reemplazan a las iniciales.
    pub fn start(config: MachineConfig) -> Result<CoffeeMaker, MachineError> {
        config.validate()?;
        let catalog = match &config.catalog_path {
            Some(path) => read_catalog_from_file(path)?,
            None => default_catalog(),
        };
        if catalog.is_empty() {
            warn!("[MACHINE] The catalog has no beverages");
        }

        let inventory = InventoryStore::new(config.max_capacity);
        inventory.seed(
            catalog
                .ingredients()
                .into_iter()
                .map(|ingredient| (ingredient, config.max_capacity)),
        )?;

        if config.restore_state {
            match load_state(&config.state_path) {
                Ok(state) => {
                    info!(
                        "[MACHINE] Restoring {} ingredients from {}",
                        state.ingredients.len(),
                        config.state_path.display()
                    );
                    inventory.seed(state.ingredients)?;
                }
                Err(e) => warn!("[MACHINE] Could not restore state: {}", e),
            }
        }

        Ok(CoffeeMaker::new(config, catalog, inventory))
    }

    /// Arma la cafetera con un catalogo e inventario ya cargados
    pub fn new(config: MachineConfig, catalog: RecipeCatalog, inventory: InventoryStore) -> CoffeeMaker {
        let inventory = Arc::new(inventory);
        let catalog = Arc::new(catalog);
        let notifications = NotificationStream::new();
        let statistics = Arc::new(Statistics::new());
        let dispenser = DispenseScheduler::new(
            config.outlets,
            inventory.clone(),
            catalog.clone(),
            notifications.notifier(),
            statistics.clone(),
            config.pour_time(),
        );
        info!(
            "[MACHINE] Started with {} outlets, {} beverages",
            config.outlets,
            catalog.len()
        );
        CoffeeMaker {
            config,
            inventory,
            catalog,
            notifications,
            statistics,
            dispenser,
        }
    }

    pub fn serve(&self, beverage: &str) -> Result<(), MachineError> {
        self.dispenser.serve(beverage)
    }

    pub fn add_ingredient(&self, name: &str) -> Result<(), MachineError> {
        if self.inventory.add(name)? {
            return Ok(());
        }
        Err(MachineError::IngredientAlreadyExists(Ingredient::new(name)))
    }

    pub fn remove_ingredient(&self, name: &str) -> Result<(), MachineError> {
        if self.inventory.remove(name)? {
            return Ok(());
        }
        Err(MachineError::IngredientNotFound(Ingredient::new(name)))
    }

    pub fn refill_ingredient(&self, name: &str) -> Result<(), MachineError> {
        if self.inventory.refill(name)? {
            return Ok(());
        }
        Err(MachineError::IngredientNotFound(Ingredient::new(name)))
    }

    pub fn refill_all(&self) -> Result<(), MachineError> {
        self.inventory.refill_all()
    }

    pub fn list_beverages(&self) -> Vec<&Beverage> {
        self.catalog.list()
    }

    pub fn list_ingredients(&self) -> Result<Snapshot, MachineError> {
        self.inventory.snapshot()
    }

    pub fn low_stock(&self, threshold: u64) -> Result<BTreeSet<Ingredient>, MachineError> {
        Ok(low_stock(&self.inventory.snapshot()?, threshold))
    }

    /// Ingredientes por debajo del umbral configurado
    pub fn low_stock_ingredients(&self) -> Result<BTreeSet<Ingredient>, MachineError> {
        self.low_stock(self.config.low_stock_threshold)
    }

    pub fn drain_notifications(&self) -> Vec<String> {
        self.notifications.drain()
    }

    pub fn wait_for_pours(&self) -> Result<(), MachineError> {
        self.dispenser.wait_for_pours()
    }

    pub fn statistics(&self) -> Result<StatisticsCounters, MachineError> {
        self.statistics.counters()
    }

    pub fn free_outlets(&self) -> Result<usize, MachineError> {
        self.dispenser.outlets().free()
    }

    pub fn statistics_report(&self) -> Result<String, MachineError> {
        Ok(report(&self.statistics.counters()?, &self.inventory.consumption()?))
    }

    pub fn state(&self) -> Result<MachineState, MachineError> {
        let mut beverages: Vec<Beverage> = self.catalog.list().into_iter().cloned().collect();
        beverages.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(MachineState {
            outlets: self.config.outlets,
            max_capacity: self.inventory.max_capacity(),
            beverages,
            ingredients: self.inventory.snapshot()?.into_iter().collect(),
            statistics: self.statistics.counters()?,
        })
    }

    /// Espera a que terminen las bebidas en curso y guarda el estado.
    /// Un error al guardar se informa pero no impide apagar la cafetera.
    pub fn shutdown(&self) -> Result<Shutdown, MachineError> {
        info!("[MACHINE] Stopping, waiting for pours in progress");
        self.dispenser.wait_for_pours()?;
        let notifications = self.notifications.drain();
        match self.statistics_report() {
            Ok(line) => info!("{}", line),
            Err(e) => warn!("[MACHINE] Could not build statistics: {}", e),
        }

        let state = self.state()?;
        let saved = save_state(&self.config.state_path, &state);
        if let Err(e) = &saved {
            error!("[MACHINE] {}", e);
        }
        Ok(Shutdown {
            notifications,
            state,
            saved,
        })
    }
}
