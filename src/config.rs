//! Configuracion de la cafetera. Todos los campos son opcionales en el archivo JSON.
use std::{fs::File, io::BufReader, path::Path, path::PathBuf, time::Duration};

use log::info;
use serde::Deserialize;

use crate::{
    constants::{LOW_STOCK_THRESHOLD, MAX_CAPACITY, N_OUTLETS, POUR_TIME_IN_MS, STATE_FILE},
    errors::MachineError,
};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    pub outlets: usize,
    pub max_capacity: u64,
    pub low_stock_threshold: u64,
    pub pour_time_ms: u64,
    pub catalog_path: Option<PathBuf>,
    pub state_path: PathBuf,
    pub restore_state: bool,
}

impl Default for MachineConfig {
    fn default() -> Self {
        MachineConfig {
            outlets: N_OUTLETS,
            max_capacity: MAX_CAPACITY,
            low_stock_threshold: LOW_STOCK_THRESHOLD,
            pour_time_ms: POUR_TIME_IN_MS,
            catalog_path: None,
            state_path: PathBuf::from(STATE_FILE),
            restore_state: false,
        }
    }
}

impl MachineConfig {
    /// Lee la configuracion. Si el archivo no existe se usan los valores por defecto.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<MachineConfig, MachineError> {
        let path = path.as_ref();
        if !path.exists() {
            info!("[CONFIG] {} not found, using defaults", path.display());
            return Ok(MachineConfig::default());
        }
        let file = File::open(path)
            .map_err(|e| MachineError::FileReaderError(format!("{}: {}", path.display(), e)))?;
        let config: MachineConfig = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| MachineError::FileReaderError(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MachineError> {
        if self.outlets == 0 {
            return Err(MachineError::InvalidConfiguration(
                "the machine needs at least one outlet".to_string(),
            ));
        }
        if self.max_capacity == 0 {
            return Err(MachineError::InvalidConfiguration(
                "max capacity must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn pour_time(&self) -> Duration {
        Duration::from_millis(self.pour_time_ms)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn should_use_defaults_when_the_file_is_missing() {
        let config = MachineConfig::load("does/not/exist.json").unwrap();
        assert_eq!(MachineConfig::default(), config);
        assert_eq!(5, config.outlets);
        assert_eq!(1000, config.max_capacity);
    }

    #[test]
    fn should_fill_missing_fields_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"outlets": 2, "pour_time_ms": 10}}"#).unwrap();

        let config = MachineConfig::load(file.path()).unwrap();

        assert_eq!(2, config.outlets);
        assert_eq!(Duration::from_millis(10), config.pour_time());
        assert_eq!(LOW_STOCK_THRESHOLD, config.low_stock_threshold);
    }

    #[test]
    fn should_reject_a_machine_without_outlets() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"outlets": 0}}"#).unwrap();
        assert!(matches!(
            MachineConfig::load(file.path()),
            Err(MachineError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn should_fail_on_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            MachineConfig::load(file.path()),
            Err(MachineError::FileReaderError(_))
        ));
    }
}
