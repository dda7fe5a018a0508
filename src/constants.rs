//! Parametros de configuracion por defecto de la cafetera

/// Cantidad de salidas (outlets) que pueden servir en simultaneo
pub const N_OUTLETS: usize = 5;

/// Capacidad maxima de cada ingrediente, igual para todos
pub const MAX_CAPACITY: u64 = 1000;

/// Cantidad absoluta a partir de la cual se considera que un ingrediente se esta acabando
pub const LOW_STOCK_THRESHOLD: u64 = 100;

/// Tiempo que tarda en servirse una bebida
pub const POUR_TIME_IN_MS: u64 = 5000;

/// Archivo donde se guarda el estado de la cafetera al apagarla
pub const STATE_FILE: &str = "data/machine.json";

/// Archivo de configuracion que se busca si no se indica otro
pub const CONFIG_FILE: &str = "config.json";

/// Cantidad de clientes que hacen pedidos en paralelo en el modo batch
pub const N_CUSTOMERS: usize = 8;
