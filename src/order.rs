/// Pedido de una bebida hecho por un cliente
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: usize,
    pub beverage: String,
}

impl Order {
    pub fn new(id: usize, beverage: &str) -> Order {
        Order {
            id,
            beverage: beverage.to_string(),
        }
    }
}
