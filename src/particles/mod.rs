pub mod particle;
pub mod profile;
pub mod simulator;
