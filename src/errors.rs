//! Errores de la cafetera
use thiserror::Error;

use crate::ingredient::Ingredient;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MachineError {
    #[error("Unknown beverage {0}")]
    UnknownBeverage(String),

    #[error("Not enough {} to make {beverage}", join(.shortfalls))]
    InsufficientStock {
        beverage: String,
        shortfalls: Vec<Ingredient>,
    },

    #[error("Ingredient {0} already added")]
    IngredientAlreadyExists(Ingredient),

    #[error("Ingredient {0} not in machine")]
    IngredientNotFound(Ingredient),

    #[error("Error while taking a lock")]
    LockError,

    #[error("IO error: {0}")]
    Io(String),

    #[error("Error reading file: {0}")]
    FileReaderError(String),

    #[error("Unable to save machine state: {0}")]
    PersistenceError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl<T> From<std::sync::PoisonError<T>> for MachineError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        MachineError::LockError
    }
}

fn join(ingredients: &[Ingredient]) -> String {
    ingredients
        .iter()
        .map(|ingredient| ingredient.to_string())
        .collect::<Vec<String>>()
        .join(", ")
}
