//! Version-space concept learning over hierarchical attribute taxonomies.
//!
//! The candidate-elimination algorithm keeps two boundary sets, S (most
//! specific consistent) and G (most general consistent), and narrows them as
//! labeled examples arrive. After learning, the lattice between the two
//! boundaries can be enumerated once and used to classify new instances by
//! majority vote.

pub mod boundary;
pub mod hypothesis;
pub mod taxonomy;
pub mod version_space;

pub use boundary::BoundarySet;
pub use hypothesis::Hypothesis;
pub use taxonomy::{Domain, NodeId, ANY_VALUE, NO_VALUE};
pub use version_space::{Classification, VersionSpace};

/// Errors surfaced by the version-space engine.
///
/// Both variants surface synchronously to the caller of the operation that
/// triggered them; nothing is retried internally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpaceError {
    /// An example or instance vector whose length differs from the number of
    /// configured attributes. Vectors are never truncated or padded.
    ArityMismatch { expected: usize, actual: usize },
    /// Classification was requested while S or G is empty, so the lattice is
    /// ill-defined. The collapsed state itself is legitimate and detectable
    /// through [`VersionSpace::is_collapsed`].
    CollapsedSpace,
}

impl std::fmt::Display for SpaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpaceError::ArityMismatch { expected, actual } => write!(
                f,
                "arity mismatch: expected {} attribute values, got {}",
                expected, actual
            ),
            SpaceError::CollapsedSpace => write!(
                f,
                "version space has collapsed: the hypothesis language cannot represent the target concept"
            ),
        }
    }
}

impl std::error::Error for SpaceError {}
