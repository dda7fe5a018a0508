/// Contenedor de un ingrediente dentro del inventario.
/// `remaining` nunca supera la capacidad maxima de la cafetera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Container {
    pub remaining: u64,
    pub consumed: u64,
}

impl Container {
    pub fn new(initial_capacity: u64) -> Container {
        Container {
            remaining: initial_capacity,
            consumed: 0,
        }
    }

    pub fn consume(&mut self, quantity: u64) {
        self.remaining -= quantity;
        self.consumed += quantity;
    }

    pub fn refill(&mut self, max_capacity: u64) {
        self.remaining = max_capacity;
    }
}
