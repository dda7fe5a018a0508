//! Deteccion de ingredientes que se estan acabando
use std::collections::BTreeSet;

use crate::{ingredient::Ingredient, inventory::Snapshot};

/// Ingredientes con cantidad menor o igual al umbral (cantidad absoluta, no porcentaje)
pub fn low_stock(snapshot: &Snapshot, threshold: u64) -> BTreeSet<Ingredient> {
    snapshot
        .iter()
        .filter(|(_, quantity)| **quantity <= threshold)
        .map(|(ingredient, _)| ingredient.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_include_ingredients_at_the_threshold() {
        let snapshot: Snapshot = vec![
            (Ingredient::new("water"), 80),
            (Ingredient::new("milk"), 100),
            (Ingredient::new("sugar"), 101),
        ]
        .into_iter()
        .collect();

        let low = low_stock(&snapshot, 100);

        assert_eq!(2, low.len());
        assert!(low.contains(&Ingredient::new("water")));
        assert!(low.contains(&Ingredient::new("milk")));
    }

    #[test]
    fn should_be_empty_when_everything_is_full() {
        let snapshot: Snapshot = vec![(Ingredient::new("water"), 1000)].into_iter().collect();
        assert!(low_stock(&snapshot, 100).is_empty());
    }
}
