pub mod bite;
pub mod frame;
pub mod session;
