//! Guardado del estado de la cafetera al apagarla
use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::{BufReader, BufWriter},
    path::Path,
};

use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    beverage::Beverage, errors::MachineError, ingredient::Ingredient,
    statistics::StatisticsCounters,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineState {
    pub outlets: usize,
    pub max_capacity: u64,
    pub beverages: Vec<Beverage>,
    pub ingredients: BTreeMap<Ingredient, u64>,
    pub statistics: StatisticsCounters,
}

/// Escribe el estado como JSON, creando los directorios que falten
pub fn save_state<P: AsRef<Path>>(path: P, state: &MachineState) -> Result<(), MachineError> {
    let path = path.as_ref();
    let to_error = |e: &dyn std::fmt::Display| {
        MachineError::PersistenceError(format!("{}: {}", path.display(), e))
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| to_error(&e))?;
        }
    }
    let file = File::create(path).map_err(|e| to_error(&e))?;
    serde_json::to_writer_pretty(BufWriter::new(file), state).map_err(|e| to_error(&e))?;
    info!("[STATE] Saved machine state to {}", path.display());
    Ok(())
}

pub fn load_state<P: AsRef<Path>>(path: P) -> Result<MachineState, MachineError> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| MachineError::FileReaderError(format!("{}: {}", path.display(), e)))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| MachineError::FileReaderError(format!("{}: {}", path.display(), e)))
}
