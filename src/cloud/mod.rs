pub mod choreographer;
pub mod config;
