//! Representacion de la cola de pedidos del modo batch
use std::collections::VecDeque;

use crate::order::Order;

pub struct OrdersQueue {
    orders: VecDeque<Order>,
}

impl OrdersQueue {
    pub fn new() -> OrdersQueue {
        OrdersQueue {
            orders: VecDeque::new(),
        }
    }

    pub fn push(&mut self, order: Order) {
        self.orders.push_back(order);
    }

    pub fn pop(&mut self) -> Option<Order> {
        self.orders.pop_front()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }
}

impl Default for OrdersQueue {
    fn default() -> Self {
        OrdersQueue::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_create_an_empty_order_queue() {
        let queue = OrdersQueue::new();
        assert_eq!(0, queue.len());
    }

    #[test]
    fn should_pop_orders_in_arrival_order() {
        let mut queue = OrdersQueue::new();
        queue.push(Order::new(1, "coffee"));
        queue.push(Order::new(2, "hot water"));
        assert_eq!(2, queue.len());
        assert_eq!(Some(Order::new(1, "coffee")), queue.pop());
        assert_eq!(Some(Order::new(2, "hot water")), queue.pop());
        assert_eq!(true, queue.pop().is_none());
    }
}
