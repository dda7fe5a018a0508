//! Ingrediente de la cafetera. Se identifica por su nombre normalizado en minusculas.
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Ingredient(String);

impl Ingredient {
    pub fn new(name: &str) -> Ingredient {
        Ingredient(name.trim().to_lowercase())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<String> for Ingredient {
    fn from(name: String) -> Self {
        Ingredient::new(&name)
    }
}

impl From<Ingredient> for String {
    fn from(ingredient: Ingredient) -> Self {
        ingredient.0
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
