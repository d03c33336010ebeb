//! Candidate-elimination learning loop, lattice enumeration and voting.

use std::collections::HashSet;

use rayon::prelude::*;
use serde::Serialize;

use crate::space::boundary::BoundarySet;
use crate::space::hypothesis::Hypothesis;
use crate::space::taxonomy::{Domain, NodeId};
use crate::space::SpaceError;

/// Outcome of a majority vote over the enumerated version space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    /// True when strictly more than half of all hypotheses cover the
    /// instance; an exact tie resolves to false.
    pub label: bool,
    /// Share of hypotheses agreeing with the returned label, in `[0, 1]`.
    pub confidence: f64,
}

/// The version space of a concept-learning run.
///
/// Owns the attribute taxonomies plus the S and G boundary sets, consumes
/// labeled examples strictly in arrival order, and can enumerate the full
/// lattice between G and S to classify new instances by majority vote.
///
/// # Example
///
/// ```rust
/// use concept_learning_core::data::weather;
/// use concept_learning_core::space::VersionSpace;
///
/// let domain = weather::weather_domain();
/// let examples = weather::training_examples(&domain);
/// let mut space = VersionSpace::new(domain);
/// space.learn(&examples).unwrap();
///
/// assert!(!space.is_collapsed());
/// let query = weather::instance(
///     space.domain(),
///     &["Sunny", "Hot", "Normal", "Strong", "Cool", "Change"],
/// );
/// let verdict = space.classify(&query).unwrap();
/// assert!(verdict.label);
/// assert_eq!(verdict.confidence, 1.0);
/// ```
pub struct VersionSpace {
    domain: Domain,
    specific: BoundarySet,
    general: BoundarySet,
    lattice: Option<Vec<Vec<Hypothesis>>>,
}

impl VersionSpace {
    /// Seeds S with the all-`_` hypothesis and G with the all-`?` one.
    pub fn new(domain: Domain) -> Self {
        let specific = BoundarySet::new(vec![Hypothesis::new(
            (0..domain.arity()).map(|a| domain.no_value(a)).collect(),
        )]);
        let general = BoundarySet::new(vec![Hypothesis::new(
            (0..domain.arity()).map(|a| domain.any_value(a)).collect(),
        )]);
        Self {
            domain,
            specific,
            general,
            lattice: None,
        }
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn specific_boundary(&self) -> &BoundarySet {
        &self.specific
    }

    pub fn general_boundary(&self) -> &BoundarySet {
        &self.general
    }

    /// True once S or G has no members left: the hypothesis language cannot
    /// represent the target concept for the examples seen. A legitimate
    /// terminal state, not an error.
    pub fn is_collapsed(&self) -> bool {
        self.specific.is_empty() || self.general.is_empty()
    }

    /// Processes one labeled example.
    ///
    /// A positive example first filters G, then generalizes S against the
    /// filtered G; a negative example first filters S, then specializes G
    /// against the filtered S. A cached lattice is not invalidated here;
    /// call [`VersionSpace::generate_intermediate_hypotheses`] to rebuild.
    pub fn observe(&mut self, example: &[NodeId], label: bool) -> Result<(), SpaceError> {
        if label {
            self.general.remove_inconsistent(&self.domain, example, true)?;
            self.specific.generalize(&self.domain, example, &self.general)?;
        } else {
            self.specific.remove_inconsistent(&self.domain, example, false)?;
            self.general.specialize(&self.domain, example, &self.specific)?;
        }
        Ok(())
    }

    /// Folds a slice of labeled examples in arrival order.
    pub fn learn(&mut self, examples: &[(Vec<NodeId>, bool)]) -> Result<(), SpaceError> {
        for (example, label) in examples {
            self.observe(example, *label)?;
        }
        Ok(())
    }

    /// The cached lattice, if one has been generated.
    pub fn lattice(&self) -> Option<&[Vec<Hypothesis>]> {
        self.lattice.as_deref()
    }

    /// Enumerates the full lattice from G (layer 0) down to S (last layer)
    /// and caches it, replacing any previous cache.
    ///
    /// Each layer holds the single-constraint specializations of the
    /// previous layer that stay strictly more general than some S member; a
    /// global already-generated set suppresses duplicates across layers.
    /// The pass terminates because every step strictly descends the finite
    /// taxonomy DAGs.
    pub fn generate_intermediate_hypotheses(&mut self) -> &[Vec<Hypothesis>] {
        let lattice = self.build_lattice();
        self.lattice.insert(lattice).as_slice()
    }

    fn build_lattice(&self) -> Vec<Vec<Hypothesis>> {
        let mut layers = vec![self.general.members().to_vec()];
        let mut generated: HashSet<Hypothesis> = HashSet::new();
        let mut base = self.general.members().to_vec();
        loop {
            let mut next: Vec<Hypothesis> = Vec::new();
            for hypothesis in &base {
                for (position, &constraint) in hypothesis.constraints().iter().enumerate() {
                    for &child in self.domain.children(constraint) {
                        let mut constraints = hypothesis.constraints().to_vec();
                        constraints[position] = child;
                        let candidate = Hypothesis::new(constraints);
                        if generated.contains(&candidate) {
                            continue;
                        }
                        let above_s = self
                            .specific
                            .members()
                            .iter()
                            .any(|s| candidate.is_strictly_more_general(&self.domain, s));
                        if above_s {
                            generated.insert(candidate.clone());
                            next.push(candidate);
                        }
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            layers.push(next.clone());
            base = next;
        }
        layers.push(self.specific.members().to_vec());
        layers
    }

    /// Majority vote of every hypothesis in every lattice layer.
    ///
    /// Builds the lattice lazily on first use. Counting within a layer is an
    /// order-independent reduction and runs in parallel; layers themselves
    /// stay sequential.
    pub fn classify(&mut self, instance: &[NodeId]) -> Result<Classification, SpaceError> {
        if instance.len() != self.domain.arity() {
            return Err(SpaceError::ArityMismatch {
                expected: self.domain.arity(),
                actual: instance.len(),
            });
        }
        if self.is_collapsed() {
            return Err(SpaceError::CollapsedSpace);
        }
        if self.lattice.is_none() {
            self.generate_intermediate_hypotheses();
        }
        let layers = match &self.lattice {
            Some(layers) => layers,
            None => return Err(SpaceError::CollapsedSpace),
        };

        let mut covering = 0usize;
        let mut total = 0usize;
        for layer in layers {
            covering += layer
                .par_iter()
                .filter(|hypothesis| hypothesis.covers_aligned(&self.domain, instance))
                .count();
            total += layer.len();
        }
        if total == 0 {
            return Err(SpaceError::CollapsedSpace);
        }

        if covering * 2 > total {
            Ok(Classification {
                label: true,
                confidence: covering as f64 / total as f64,
            })
        } else {
            Ok(Classification {
                label: false,
                confidence: (total - covering) as f64 / total as f64,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::weather;

    fn trained_space() -> VersionSpace {
        let domain = weather::weather_domain();
        let examples = weather::training_examples(&domain);
        let mut space = VersionSpace::new(domain);
        space.learn(&examples).unwrap();
        space
    }

    #[test]
    fn test_weather_scenario_boundaries() {
        let space = trained_space();
        assert_eq!(
            space.specific_boundary().describe(space.domain()),
            "{<Sunny, Hot, ?, Strong, ?, ?>}"
        );
        assert_eq!(
            space.general_boundary().describe(space.domain()),
            "{<Sunny, ?, ?, ?, ?, ?>, <?, Hot, ?, ?, ?, ?>}"
        );
        assert!(!space.is_collapsed());
    }

    #[test]
    fn test_weather_scenario_lattice_layers() {
        let mut space = trained_space();
        let layers = space.generate_intermediate_hypotheses().to_vec();
        let rendered: Vec<Vec<String>> = layers
            .iter()
            .map(|layer| layer.iter().map(|h| h.describe(space.domain())).collect())
            .collect();
        assert_eq!(
            rendered,
            vec![
                vec![
                    "<Sunny, ?, ?, ?, ?, ?>".to_string(),
                    "<?, Hot, ?, ?, ?, ?>".to_string(),
                ],
                vec![
                    "<Sunny, Hot, ?, ?, ?, ?>".to_string(),
                    "<Sunny, ?, ?, Strong, ?, ?>".to_string(),
                    "<?, Hot, ?, Strong, ?, ?>".to_string(),
                ],
                vec!["<Sunny, Hot, ?, Strong, ?, ?>".to_string()],
            ]
        );
    }

    #[test]
    fn test_weather_scenario_classification() {
        let mut space = trained_space();
        let positive = weather::instance(
            space.domain(),
            &["Sunny", "Hot", "Normal", "Strong", "Cool", "Change"],
        );
        let negative = weather::instance(
            space.domain(),
            &["Rainy", "Cold", "Normal", "Weak", "Warm", "Same"],
        );
        assert_eq!(
            space.classify(&positive).unwrap(),
            Classification {
                label: true,
                confidence: 1.0
            }
        );
        assert_eq!(
            space.classify(&negative).unwrap(),
            Classification {
                label: false,
                confidence: 1.0
            }
        );
    }

    #[test]
    fn test_weather_scenario_split_votes() {
        let mut space = trained_space();
        let tied = weather::instance(
            space.domain(),
            &["Sunny", "Hot", "Normal", "Weak", "Warm", "Same"],
        );
        let verdict = space.classify(&tied).unwrap();
        // Exactly half of the six lattice hypotheses cover: strict majority
        // fails and the tie goes negative.
        assert!(!verdict.label);
        assert_eq!(verdict.confidence, 0.5);

        let leaning = weather::instance(
            space.domain(),
            &["Sunny", "Cold", "Normal", "Strong", "Warm", "Same"],
        );
        let verdict = space.classify(&leaning).unwrap();
        assert!(!verdict.label);
        assert!((verdict.confidence - 4.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_lattice_generation_is_idempotent() {
        let mut space = trained_space();
        let first = space.generate_intermediate_hypotheses().to_vec();
        let second = space.generate_intermediate_hypotheses().to_vec();
        assert_eq!(first, second);
    }

    #[test]
    fn test_classify_rejects_arity_mismatch() {
        let mut space = trained_space();
        let short = vec![space.domain().any_value(0)];
        assert!(matches!(
            space.classify(&short),
            Err(SpaceError::ArityMismatch {
                expected: 6,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_rejected_example_leaves_boundaries_intact() {
        let mut space = trained_space();
        let s_before = space.specific_boundary().describe(space.domain());
        let g_before = space.general_boundary().describe(space.domain());
        let short = vec![space.domain().any_value(0)];
        assert!(matches!(
            space.observe(&short, true),
            Err(SpaceError::ArityMismatch { .. })
        ));
        assert!(matches!(
            space.observe(&short, false),
            Err(SpaceError::ArityMismatch { .. })
        ));
        assert_eq!(space.specific_boundary().describe(space.domain()), s_before);
        assert_eq!(space.general_boundary().describe(space.domain()), g_before);
        assert!(!space.is_collapsed());
    }

    #[test]
    fn test_contradictory_examples_collapse_the_space() {
        let domain = weather::weather_domain();
        let example =
            weather::instance(&domain, &["Sunny", "Hot", "Normal", "Strong", "Warm", "Same"]);
        let mut space = VersionSpace::new(domain);
        space.observe(&example, true).unwrap();
        space.observe(&example, false).unwrap();
        assert!(space.is_collapsed());
        assert!(matches!(
            space.classify(&example),
            Err(SpaceError::CollapsedSpace)
        ));
    }

    #[test]
    fn test_monotonicity_of_boundaries() {
        let domain = weather::weather_domain();
        let examples = weather::training_examples(&domain);
        let mut space = VersionSpace::new(domain);
        for (example, label) in &examples {
            let old_s = space.specific_boundary().members().to_vec();
            let old_g = space.general_boundary().members().to_vec();
            space.observe(example, *label).unwrap();
            // Every new S member lies above some old S member; every new G
            // member lies below some old G member. The converse does not
            // hold: a member eliminated outright by a filtering step has no
            // successor in the new set.
            for new in space.specific_boundary().members() {
                assert!(old_s
                    .iter()
                    .any(|old| new.is_more_general_or_equal(space.domain(), old)));
            }
            for new in space.general_boundary().members() {
                assert!(old_g
                    .iter()
                    .any(|old| old.is_more_general_or_equal(space.domain(), new)));
            }
        }
    }

    #[test]
    fn test_antichain_invariant_throughout_learning() {
        let domain = weather::weather_domain();
        let examples = weather::training_examples(&domain);
        let mut space = VersionSpace::new(domain);
        for (example, label) in &examples {
            space.observe(example, *label).unwrap();
            for set in [space.specific_boundary(), space.general_boundary()] {
                for a in set.members() {
                    for b in set.members() {
                        assert!(!a.is_strictly_more_general(space.domain(), b));
                    }
                }
            }
        }
    }

    #[test]
    fn test_representation_theorem_on_small_domain() {
        let mut domain = Domain::new();
        let a = domain.add_attribute("A");
        domain.add_value(a, "a1", &[]);
        domain.add_value(a, "a2", &[]);
        let b = domain.add_attribute("B");
        domain.add_value(b, "b1", &[]);
        domain.add_value(b, "b2", &[]);

        let all: Vec<Hypothesis> = {
            let mut out = Vec::new();
            for &ca in domain.attribute_nodes(a) {
                for &cb in domain.attribute_nodes(b) {
                    out.push(Hypothesis::new(vec![ca, cb]));
                }
            }
            out
        };

        let a1 = domain.lookup(a, "a1").unwrap();
        let a2 = domain.lookup(a, "a2").unwrap();
        let b1 = domain.lookup(b, "b1").unwrap();
        let examples = vec![(vec![a1, b1], true), (vec![a2, b1], false)];

        let mut space = VersionSpace::new(domain);
        let mut seen: Vec<(Vec<NodeId>, bool)> = Vec::new();
        for (example, label) in examples {
            space.observe(&example, label).unwrap();
            seen.push((example, label));
            for hypothesis in &all {
                let consistent = seen.iter().all(|(ex, lab)| {
                    hypothesis.covers(space.domain(), ex).unwrap() == *lab
                });
                if consistent {
                    let bounded_below = space
                        .specific_boundary()
                        .members()
                        .iter()
                        .any(|s| hypothesis.is_more_general_or_equal(space.domain(), s));
                    let bounded_above = space
                        .general_boundary()
                        .members()
                        .iter()
                        .any(|g| g.is_more_general_or_equal(space.domain(), hypothesis));
                    assert!(
                        bounded_below && bounded_above,
                        "consistent hypothesis {} escaped the boundaries",
                        hypothesis.describe(space.domain()),
                    );
                }
            }
        }
    }
}
