pub mod nozzle;
pub mod overlay;
pub mod plan;
pub mod splash;
