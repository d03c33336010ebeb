//! # Concept Learning Core
//!
//! A deterministic Rust engine for classic machine learning. The
//! centrepiece is a version-space learner: candidate elimination over a
//! lattice of hypotheses induced by per-attribute generalization
//! hierarchies, with boundary-set maintenance, lattice enumeration and
//! majority-vote classification. Alongside it live the companion learners
//! of the same family: ID3 decision-tree induction, gradient-descent linear
//! regression and a back-propagation network.
//!
//! ## Quick Start
//!
//! ```rust
//! use concept_learning_core::data::weather;
//! use concept_learning_core::space::VersionSpace;
//!
//! let domain = weather::weather_domain();
//! let examples = weather::training_examples(&domain);
//!
//! let mut space = VersionSpace::new(domain);
//! space.learn(&examples).unwrap();
//! assert!(!space.is_collapsed());
//!
//! let query = weather::instance(
//!     space.domain(),
//!     &["Sunny", "Hot", "Normal", "Strong", "Cool", "Change"],
//! );
//! let verdict = space.classify(&query).unwrap();
//! println!("label={} confidence={}", verdict.label, verdict.confidence);
//! ```
//!
//! ## Core Modules
//!
//! - [`space`] - Version-space learning: taxonomies, hypotheses, boundaries
//! - [`config`] - Domain and dataset configuration via TOML
//! - [`logging`] - JSON line-delimited logging
//! - [`tree`] - ID3 decision-tree induction
//! - [`regression`] - Gradient-descent linear regression
//! - [`neural`] - Back-propagation network

pub mod config;
pub mod data;
pub mod logging;
pub mod neural;
pub mod regression;
pub mod space;
pub mod tree;

pub use config::{ConfigError, DomainConfig};
pub use logging::JsonLogger;
pub use neural::{Activation, Network};
pub use regression::LinearRegressor;
pub use space::{
    BoundarySet, Classification, Domain, Hypothesis, NodeId, SpaceError, VersionSpace,
};
pub use tree::DecisionTree;
