//! Inventario de ingredientes de la cafetera.
//!
//! Todas las operaciones que modifican el inventario toman el mismo lock de escritura,
//! por lo que la verificacion y el descuento de una receta ocurren en una unica seccion critica.
use std::{collections::HashMap, sync::RwLock};

use log::{debug, info};

use crate::{beverage::Recipe, container::Container, errors::MachineError, ingredient::Ingredient};

/// Vista de solo lectura de las cantidades del inventario
pub type Snapshot = HashMap<Ingredient, u64>;

/// Resultado de intentar reservar los ingredientes de una receta
#[derive(Debug, PartialEq, Eq)]
pub enum Reservation {
    Reserved,
    /// Ingredientes insuficientes, ordenados por nombre
    Rejected(Vec<Ingredient>),
}

pub struct InventoryStore {
    containers: RwLock<HashMap<Ingredient, Container>>,
    max_capacity: u64,
}

impl InventoryStore {
    pub fn new(max_capacity: u64) -> InventoryStore {
        InventoryStore {
            containers: RwLock::new(HashMap::new()),
            max_capacity,
        }
    }

    /// Carga inicial del inventario. Las cantidades se recortan a la capacidad maxima.
    /// Un ingrediente ya presente se sobreescribe.
    pub fn seed<I>(&self, quantities: I) -> Result<(), MachineError>
    where
        I: IntoIterator<Item = (Ingredient, u64)>,
    {
        let mut containers = self.containers.write()?;
        for (ingredient, quantity) in quantities {
            containers.insert(ingredient, Container::new(quantity.min(self.max_capacity)));
        }
        Ok(())
    }

    /// Verifica que haya suficiente de cada ingrediente de la receta y, si es asi, los descuenta todos.
    /// Si falta alguno no se modifica nada y se devuelven los ingredientes insuficientes ordenados.
    pub fn check_and_reserve(&self, recipe: &Recipe) -> Result<Reservation, MachineError> {
        let mut containers = self.containers.write()?;

        let mut shortfalls: Vec<Ingredient> = recipe
            .iter()
            .filter(|(ingredient, required)| {
                containers
                    .get(*ingredient)
                    .map_or(true, |container| container.remaining < **required)
            })
            .map(|(ingredient, _)| ingredient.clone())
            .collect();

        if !shortfalls.is_empty() {
            shortfalls.sort();
            debug!("[INVENTORY] Reservation rejected, short of {:?}", shortfalls);
            return Ok(Reservation::Rejected(shortfalls));
        }

        for (ingredient, required) in recipe {
            if let Some(container) = containers.get_mut(ingredient) {
                container.consume(*required);
                debug!(
                    "[INVENTORY] Uses {} of {}, remains {}",
                    required, ingredient, container.remaining
                );
            }
        }
        Ok(Reservation::Reserved)
    }

    /// Agrega el ingrediente con la capacidad maxima. Devuelve false si ya existia.
    pub fn add(&self, name: &str) -> Result<bool, MachineError> {
        let ingredient = Ingredient::new(name);
        let mut containers = self.containers.write()?;
        if containers.contains_key(&ingredient) {
            return Ok(false);
        }
        info!("[INVENTORY] Added {}", ingredient);
        containers.insert(ingredient, Container::new(self.max_capacity));
        Ok(true)
    }

    /// Elimina el ingrediente. Devuelve false si no existia.
    pub fn remove(&self, name: &str) -> Result<bool, MachineError> {
        let ingredient = Ingredient::new(name);
        let removed = self.containers.write()?.remove(&ingredient).is_some();
        if removed {
            info!("[INVENTORY] Removed {}", ingredient);
        }
        Ok(removed)
    }

    /// Repone el ingrediente hasta la capacidad maxima. Devuelve false si no existia.
    pub fn refill(&self, name: &str) -> Result<bool, MachineError> {
        let ingredient = Ingredient::new(name);
        let mut containers = self.containers.write()?;
        match containers.get_mut(&ingredient) {
            Some(container) => {
                container.refill(self.max_capacity);
                info!("[INVENTORY] Refilled {}", ingredient);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn refill_all(&self) -> Result<(), MachineError> {
        let mut containers = self.containers.write()?;
        for container in containers.values_mut() {
            container.refill(self.max_capacity);
        }
        info!("[INVENTORY] Refilled {} ingredients", containers.len());
        Ok(())
    }

    pub fn snapshot(&self) -> Result<Snapshot, MachineError> {
        let containers = self.containers.read()?;
        Ok(containers
            .iter()
            .map(|(ingredient, container)| (ingredient.clone(), container.remaining))
            .collect())
    }

    /// Cantidad consumida de cada ingrediente desde que se agrego a la cafetera
    pub fn consumption(&self) -> Result<Snapshot, MachineError> {
        let containers = self.containers.read()?;
        Ok(containers
            .iter()
            .map(|(ingredient, container)| (ingredient.clone(), container.consumed))
            .collect())
    }

    pub fn max_capacity(&self) -> u64 {
        self.max_capacity
    }
}
