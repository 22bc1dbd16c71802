pub mod config;
pub mod engine;
pub mod games;
pub mod id_generator;
pub mod identifiers;
pub mod logger;
mod defaults;

pub use identifiers::*;
