pub mod gate;
pub mod shake;
pub mod stage;
