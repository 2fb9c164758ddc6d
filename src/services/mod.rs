pub mod generator;

pub use generator::{generate, generate_with_rng};
