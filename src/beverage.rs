//! Bebidas que sabe preparar la cafetera
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::ingredient::Ingredient;

/// Receta de una bebida: cantidad requerida de cada ingrediente, siempre mayor a cero.
pub type Recipe = HashMap<Ingredient, u64>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Beverage {
    name: String,
    recipe: Recipe,
}

impl Beverage {
    /// Crea la bebida normalizando el nombre. Los ingredientes con cantidad cero se descartan
    /// y los repetidos se suman, saturando en `u64::MAX`.
    pub fn new(name: &str, ingredients: Vec<(Ingredient, u64)>) -> Beverage {
        let mut recipe = Recipe::new();
        for (ingredient, quantity) in ingredients {
            if 0 < quantity {
                let total = recipe.entry(ingredient).or_insert(0);
                *total = total.saturating_add(quantity);
            }
        }
        Beverage {
            name: normalize_name(name),
            recipe,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }
}

pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_drop_ingredients_with_zero_quantity() {
        let beverage = Beverage::new(
            "Hot Water",
            vec![(Ingredient::new("water"), 50), (Ingredient::new("sugar"), 0)],
        );
        assert_eq!("hot water", beverage.name());
        assert_eq!(1, beverage.recipe().len());
        assert_eq!(Some(&50), beverage.recipe().get(&Ingredient::new("water")));
    }

    #[test]
    fn should_merge_repeated_ingredients() {
        let beverage = Beverage::new(
            "tea",
            vec![(Ingredient::new("water"), 20), (Ingredient::new("Water"), 30)],
        );
        assert_eq!(Some(&50), beverage.recipe().get(&Ingredient::new("water")));
    }

    #[test]
    fn should_saturate_when_repeated_ingredients_overflow() {
        let beverage = Beverage::new(
            "tea",
            vec![(Ingredient::new("Water"), u64::MAX), (Ingredient::new("water"), 1)],
        );
        assert_eq!(Some(&u64::MAX), beverage.recipe().get(&Ingredient::new("water")));
    }
}
