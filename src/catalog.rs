//! Catalogo de bebidas. Se arma una unica vez al encender la cafetera y luego es de solo lectura.
use std::{collections::HashMap, fs::File, io::BufReader, path::Path};

use log::{debug, info};
use serde::Deserialize;

use crate::{
    beverage::{normalize_name, Beverage},
    errors::MachineError,
    ingredient::Ingredient,
};

#[derive(Debug, Clone, Default)]
pub struct RecipeCatalog {
    beverages: HashMap<String, Beverage>,
}

impl RecipeCatalog {
    /// Si hay bebidas con el mismo nombre se queda con la ultima.
    pub fn new(beverages: Vec<Beverage>) -> RecipeCatalog {
        RecipeCatalog {
            beverages: beverages
                .into_iter()
                .map(|beverage| (beverage.name().to_string(), beverage))
                .collect(),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Beverage> {
        self.beverages.get(&normalize_name(name))
    }

    pub fn list(&self) -> Vec<&Beverage> {
        self.beverages.values().collect()
    }

    /// Todos los ingredientes que aparecen en alguna receta
    pub fn ingredients(&self) -> Vec<Ingredient> {
        let mut ingredients: Vec<Ingredient> = self
            .beverages
            .values()
            .flat_map(|beverage| beverage.recipe().keys().cloned())
            .collect();
        ingredients.sort();
        ingredients.dedup();
        ingredients
    }

    pub fn len(&self) -> usize {
        self.beverages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beverages.is_empty()
    }
}

/// Bebidas con las que viene la cafetera de fabrica
pub fn default_catalog() -> RecipeCatalog {
    let recipe = |items: &[(&str, u64)]| -> Vec<(Ingredient, u64)> {
        items
            .iter()
            .map(|(name, quantity)| (Ingredient::new(name), *quantity))
            .collect()
    };

    RecipeCatalog::new(vec![
        Beverage::new(
            "ginger tea",
            recipe(&[
                ("hot water", 50),
                ("hot milk", 10),
                ("tea leaves syrup", 10),
                ("ginger syrup", 5),
                ("sugar syrup", 10),
            ]),
        ),
        Beverage::new(
            "elaichi tea",
            recipe(&[
                ("hot water", 50),
                ("hot milk", 10),
                ("tea leaves syrup", 10),
                ("elaichi syrup", 5),
                ("sugar syrup", 10),
            ]),
        ),
        Beverage::new(
            "coffee",
            recipe(&[
                ("hot water", 50),
                ("hot milk", 10),
                ("coffee syrup", 10),
                ("sugar syrup", 10),
            ]),
        ),
        Beverage::new("hot milk", recipe(&[("milk", 50)])),
        Beverage::new("hot water", recipe(&[("water", 50)])),
    ])
}

#[derive(Deserialize, Debug)]
struct JsonBeverage {
    name: String,
    ingredients: HashMap<String, u64>,
}

#[derive(Deserialize)]
struct CatalogConfiguration {
    beverages: Vec<JsonBeverage>,
}

/// Lee el catalogo de un archivo JSON con la forma `{"beverages": [{"name": .., "ingredients": {..}}]}`
pub fn read_catalog_from_file<P: AsRef<Path>>(path: P) -> Result<RecipeCatalog, MachineError> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| MachineError::FileReaderError(format!("{}: {}", path.display(), e)))?;
    let configuration: CatalogConfiguration = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| MachineError::FileReaderError(format!("{}: {}", path.display(), e)))?;

    let beverages: Vec<Beverage> = configuration
        .beverages
        .into_iter()
        .map(|json_beverage| {
            debug!("[READER] Read beverage {}", json_beverage.name);
            let ingredients = json_beverage
                .ingredients
                .into_iter()
                .map(|(name, quantity)| (Ingredient::new(&name), quantity))
                .collect();
            Beverage::new(&json_beverage.name, ingredients)
        })
        .collect();
    info!("[READER] Loaded {} beverages from {}", beverages.len(), path.display());
    Ok(RecipeCatalog::new(beverages))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn should_have_the_five_factory_beverages() {
        let catalog = default_catalog();
        assert_eq!(5, catalog.len());
        let coffee = catalog.lookup("coffee").unwrap();
        assert_eq!(4, coffee.recipe().len());
        assert_eq!(Some(&50), coffee.recipe().get(&Ingredient::new("hot water")));
    }

    #[test]
    fn should_lookup_ignoring_case() {
        let catalog = default_catalog();
        assert!(catalog.lookup("Ginger Tea").is_some());
        assert!(catalog.lookup("mocha").is_none());
    }

    #[test]
    fn should_list_each_ingredient_once() {
        let ingredients = default_catalog().ingredients();
        assert_eq!(9, ingredients.len());
        assert!(ingredients.contains(&Ingredient::new("sugar syrup")));
    }

    #[test]
    fn should_keep_the_last_beverage_with_a_repeated_name() {
        let catalog = RecipeCatalog::new(vec![
            Beverage::new("tea", vec![(Ingredient::new("water"), 10)]),
            Beverage::new("Tea", vec![(Ingredient::new("water"), 20)]),
        ]);
        assert_eq!(1, catalog.len());
        assert_eq!(
            Some(&20),
            catalog.lookup("tea").unwrap().recipe().get(&Ingredient::new("water"))
        );
    }

    #[test]
    fn should_read_the_catalog_from_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"beverages": [{{"name": "Green Tea", "ingredients": {{"Hot Water": 40, "green tea": 5, "sugar": 0}}}}]}}"#
        )
        .unwrap();

        let catalog = read_catalog_from_file(file.path()).unwrap();

        let tea = catalog.lookup("green tea").unwrap();
        assert_eq!(2, tea.recipe().len());
        assert_eq!(Some(&40), tea.recipe().get(&Ingredient::new("hot water")));
    }

    #[test]
    fn should_merge_ingredients_repeated_with_different_case() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"beverages": [{{"name": "tea", "ingredients": {{"Water": 18446744073709551615, "water": 1, "Sugar": 2, "sugar": 3}}}}]}}"#
        )
        .unwrap();

        let catalog = read_catalog_from_file(file.path()).unwrap();

        let tea = catalog.lookup("tea").unwrap();
        assert_eq!(2, tea.recipe().len());
        assert_eq!(Some(&u64::MAX), tea.recipe().get(&Ingredient::new("water")));
        assert_eq!(Some(&5), tea.recipe().get(&Ingredient::new("sugar")));
    }

    #[test]
    fn should_fail_reading_a_missing_file() {
        let result = read_catalog_from_file("does/not/exist.json");
        assert!(matches!(result, Err(MachineError::FileReaderError(_))));
    }
}
