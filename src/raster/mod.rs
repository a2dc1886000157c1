pub mod composite;
pub mod cpu;
pub mod surface;
