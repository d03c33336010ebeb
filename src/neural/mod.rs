//! Feed-forward network trained by error back-propagation.

pub mod network;

pub use network::{Activation, Network, NetworkError};
