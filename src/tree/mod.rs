//! Decision-tree induction over categorical tabular data.

pub mod id3;

pub use id3::{DecisionTree, Row, TreeError};
