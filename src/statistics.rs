//! Estadisticas de los pedidos atendidos por la cafetera
use std::{collections::BTreeMap, sync::Mutex};

use serde::{Deserialize, Serialize};

use crate::{errors::MachineError, inventory::Snapshot};

/// Contadores del nucleo de despacho
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsCounters {
    pub served: u64,
    pub rejected_for_stock: u64,
    pub rejected_unknown: u64,
    pub pouring: usize,
    pub peak_pouring: usize,
}

#[derive(Default)]
pub struct Statistics {
    counters: Mutex<StatisticsCounters>,
}

impl Statistics {
    pub fn new() -> Statistics {
        Statistics::default()
    }

    pub fn pour_started(&self) -> Result<(), MachineError> {
        let mut counters = self.counters.lock()?;
        counters.pouring += 1;
        counters.peak_pouring = counters.peak_pouring.max(counters.pouring);
        Ok(())
    }

    pub fn pour_finished(&self) -> Result<(), MachineError> {
        let mut counters = self.counters.lock()?;
        counters.pouring -= 1;
        counters.served += 1;
        Ok(())
    }

    pub fn rejected_for_stock(&self) -> Result<(), MachineError> {
        self.counters.lock()?.rejected_for_stock += 1;
        Ok(())
    }

    pub fn rejected_unknown(&self) -> Result<(), MachineError> {
        self.counters.lock()?.rejected_unknown += 1;
        Ok(())
    }

    pub fn counters(&self) -> Result<StatisticsCounters, MachineError> {
        Ok(*self.counters.lock()?)
    }
}

/// Arma la linea de estadisticas con los contadores y lo consumido de cada ingrediente
pub fn report(counters: &StatisticsCounters, consumption: &Snapshot) -> String {
    let mut statistics = format!(
        "[STATISTICS] Served={} | Rejected (stock={}, unknown={}) | Pouring={} (peak {}) | Consumed |",
        counters.served,
        counters.rejected_for_stock,
        counters.rejected_unknown,
        counters.pouring,
        counters.peak_pouring
    );
    let sorted: BTreeMap<_, _> = consumption.iter().collect();
    for (ingredient, consumed) in sorted {
        statistics.push_str(&format!(" {}={} ", ingredient, consumed));
    }
    statistics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingredient::Ingredient;

    #[test]
    fn should_track_the_peak_of_simultaneous_pours() {
        let statistics = Statistics::new();
        statistics.pour_started().unwrap();
        statistics.pour_started().unwrap();
        statistics.pour_finished().unwrap();
        statistics.pour_started().unwrap();

        let counters = statistics.counters().unwrap();
        assert_eq!(2, counters.pouring);
        assert_eq!(2, counters.peak_pouring);
        assert_eq!(1, counters.served);
    }

    #[test]
    fn should_report_consumption_sorted_by_ingredient() {
        let consumption: Snapshot = vec![(Ingredient::new("water"), 50), (Ingredient::new("milk"), 10)]
            .into_iter()
            .collect();
        let line = report(&StatisticsCounters::default(), &consumption);
        assert!(line.ends_with(" milk=10  water=50 "));
        assert!(line.starts_with("[STATISTICS] Served=0"));
    }
}
