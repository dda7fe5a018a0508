//! Salidas de la cafetera. Funcionan como un semaforo contador:
//! cada bebida en curso tiene un `OutletSlot` y lo libera al terminar de servirse.
use std::sync::{Arc, Condvar, Mutex};

use log::debug;

use crate::errors::MachineError;

pub struct Outlets {
    free: Mutex<usize>,
    outlet_released: Condvar,
    total: usize,
}

impl Outlets {
    pub fn new(total: usize) -> Outlets {
        Outlets {
            free: Mutex::new(total),
            outlet_released: Condvar::new(),
            total,
        }
    }

    /// Bloquea hasta que haya una salida libre
    pub fn acquire(self: &Arc<Self>) -> Result<OutletSlot, MachineError> {
        let mut free = self
            .outlet_released
            .wait_while(self.free.lock()?, |free| *free == 0)?;
        *free -= 1;
        debug!("[OUTLET] Taken, {} of {} free", *free, self.total);
        Ok(OutletSlot {
            outlets: self.clone(),
        })
    }

    /// Bloquea hasta que todas las salidas esten libres
    pub fn wait_all_free(&self) -> Result<(), MachineError> {
        let _free = self
            .outlet_released
            .wait_while(self.free.lock()?, |free| *free < self.total)?;
        Ok(())
    }

    pub fn free(&self) -> Result<usize, MachineError> {
        Ok(*self.free.lock()?)
    }

    fn release(&self) {
        // Si el lock esta envenenado igual hay que liberar la salida
        let mut free = match self.free.lock() {
            Ok(free) => free,
            Err(poisoned) => poisoned.into_inner(),
        };
        *free += 1;
        debug!("[OUTLET] Released, {} of {} free", *free, self.total);
        self.outlet_released.notify_all();
    }
}

/// Salida tomada. Se libera al hacer drop.
pub struct OutletSlot {
    outlets: Arc<Outlets>,
}

impl Drop for OutletSlot {
    fn drop(&mut self) {
        self.outlets.release();
    }
}

#[cfg(test)]
mod tests {
    use std::{thread, time::Duration};

    use super::*;

    #[test]
    fn should_release_the_outlet_on_drop() {
        let outlets = Arc::new(Outlets::new(2));
        let slot = outlets.acquire().unwrap();
        assert_eq!(1, outlets.free().unwrap());
        drop(slot);
        assert_eq!(2, outlets.free().unwrap());
    }

    #[test]
    fn should_block_until_an_outlet_is_released() {
        let outlets = Arc::new(Outlets::new(1));
        let slot = outlets.acquire().unwrap();

        let outlets_clone = outlets.clone();
        let waiter = thread::spawn(move || {
            let _slot = outlets_clone.acquire().unwrap();
        });

        thread::sleep(Duration::from_millis(50));
        assert!(!waiter.is_finished());
        drop(slot);
        waiter.join().unwrap();
        assert_eq!(1, outlets.free().unwrap());
    }

    #[test]
    fn should_wait_until_every_outlet_is_free() {
        let outlets = Arc::new(Outlets::new(2));
        let first = outlets.acquire().unwrap();
        let second = outlets.acquire().unwrap();

        let releaser = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            drop(first);
            thread::sleep(Duration::from_millis(20));
            drop(second);
        });

        outlets.wait_all_free().unwrap();
        assert_eq!(2, outlets.free().unwrap());
        releaser.join().unwrap();
    }
}
