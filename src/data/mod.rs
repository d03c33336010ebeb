//! Bundled reference datasets for the classic learning problems.

pub mod tennis;
pub mod weather;

pub use tennis::{play_tennis_examples, PLAY_TENNIS_TARGET};
pub use weather::{query_instances, training_examples, weather_domain};
