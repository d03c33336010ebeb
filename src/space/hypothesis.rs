//! Candidate concept descriptions and their minimal-change search.
//!
//! A hypothesis pins one taxonomy node per attribute. The partial order and
//! the coverage test are pointwise lifts of the taxonomy order; the
//! specialization and generalization searches produce the nearest single- or
//! per-position changes that restore consistency with a new example, so
//! boundary sets only ever move by minimal steps.

use std::collections::HashSet;

use serde::Serialize;

use crate::space::boundary::BoundarySet;
use crate::space::taxonomy::{Domain, NodeId};
use crate::space::SpaceError;

/// An ordered vector of taxonomy nodes, one per attribute position.
///
/// Hypotheses are immutable value objects: every change produces a new
/// instance. Equality and hashing go over the id vector, which makes the
/// constraint tuple itself the canonical deduplication key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Hypothesis {
    constraints: Vec<NodeId>,
}

impl Hypothesis {
    pub fn new(constraints: Vec<NodeId>) -> Self {
        Self { constraints }
    }

    pub fn constraints(&self) -> &[NodeId] {
        &self.constraints
    }

    /// True if every constraint is more general than or equal to the
    /// corresponding instance value.
    ///
    /// Fails with [`SpaceError::ArityMismatch`] when the instance length
    /// differs from the constraint length; vectors are never truncated or
    /// padded.
    pub fn covers(&self, domain: &Domain, instance: &[NodeId]) -> Result<bool, SpaceError> {
        if instance.len() != self.constraints.len() {
            return Err(SpaceError::ArityMismatch {
                expected: self.constraints.len(),
                actual: instance.len(),
            });
        }
        Ok(self.covers_aligned(domain, instance))
    }

    /// Coverage check for instances whose arity was already validated.
    pub(crate) fn covers_aligned(&self, domain: &Domain, instance: &[NodeId]) -> bool {
        debug_assert_eq!(instance.len(), self.constraints.len());
        self.constraints
            .iter()
            .zip(instance)
            .all(|(&constraint, &value)| domain.is_more_general_or_equal(constraint, value))
    }

    /// Pointwise lift of the taxonomy more-general-or-equal relation.
    pub fn is_more_general_or_equal(&self, domain: &Domain, other: &Hypothesis) -> bool {
        self.constraints.len() == other.constraints.len()
            && self
                .constraints
                .iter()
                .zip(&other.constraints)
                .all(|(&a, &b)| domain.is_more_general_or_equal(a, b))
    }

    pub fn is_strictly_more_general(&self, domain: &Domain, other: &Hypothesis) -> bool {
        self.is_more_general_or_equal(domain, other)
            && !other.is_more_general_or_equal(domain, self)
    }

    /// Nearest single-constraint specializations that reject a negative
    /// example.
    ///
    /// For each position the search walks breadth-first outward from the
    /// constraint's direct children. As soon as any candidate at the current
    /// depth fails to cover the negative value, that whole depth is consumed
    /// and deeper levels are not explored for the position; the stop applies
    /// per frontier, not per candidate. Each emitted hypothesis changes
    /// exactly one position, must not cover the negative example as a whole,
    /// and must stay strictly more general than at least one member of `s`,
    /// keeping it inside the version-space interior.
    pub fn minimal_specializations(
        &self,
        domain: &Domain,
        negative: &[NodeId],
        s: &BoundarySet,
    ) -> Result<Vec<Hypothesis>, SpaceError> {
        if negative.len() != self.constraints.len() {
            return Err(SpaceError::ArityMismatch {
                expected: self.constraints.len(),
                actual: negative.len(),
            });
        }
        let mut out = Vec::new();
        for (position, (&constraint, &value)) in self.constraints.iter().zip(negative).enumerate() {
            let mut frontier = domain.children(constraint).to_vec();
            let mut seen: HashSet<NodeId> = frontier.iter().copied().collect();
            while !frontier.is_empty() {
                let mut depth_qualifies = false;
                for &candidate in &frontier {
                    if !domain.is_more_general_or_equal(candidate, value) {
                        depth_qualifies = true;
                        let mut constraints = self.constraints.clone();
                        constraints[position] = candidate;
                        let specialized = Hypothesis::new(constraints);
                        if !specialized.covers_aligned(domain, negative)
                            && s.members()
                                .iter()
                                .any(|member| specialized.is_strictly_more_general(domain, member))
                        {
                            out.push(specialized);
                        }
                    }
                }
                if depth_qualifies {
                    break;
                }
                let mut next = Vec::new();
                for node in frontier {
                    for &child in domain.children(node) {
                        if seen.insert(child) {
                            next.push(child);
                        }
                    }
                }
                frontier = next;
            }
        }
        Ok(out)
    }

    /// Nearest generalizations that cover a positive example.
    ///
    /// Positions whose constraint already covers the value keep that
    /// constraint as their sole candidate. Other positions walk breadth-first
    /// up through parents and take every covering candidate at the first
    /// depth that yields one, again stopping per frontier. The result is the
    /// cartesian product of the per-position candidates, filtered to
    /// hypotheses that cover the positive example and stay strictly more
    /// specific than at least one member of `g`.
    pub fn minimal_generalizations(
        &self,
        domain: &Domain,
        positive: &[NodeId],
        g: &BoundarySet,
    ) -> Result<Vec<Hypothesis>, SpaceError> {
        if positive.len() != self.constraints.len() {
            return Err(SpaceError::ArityMismatch {
                expected: self.constraints.len(),
                actual: positive.len(),
            });
        }
        let mut per_position: Vec<Vec<NodeId>> = Vec::with_capacity(self.constraints.len());
        for (&constraint, &value) in self.constraints.iter().zip(positive) {
            if domain.is_more_general_or_equal(constraint, value) {
                per_position.push(vec![constraint]);
                continue;
            }
            let mut candidates = Vec::new();
            let mut frontier = domain.parents(constraint).to_vec();
            let mut seen: HashSet<NodeId> = frontier.iter().copied().collect();
            while !frontier.is_empty() {
                let mut depth_qualifies = false;
                for &candidate in &frontier {
                    if domain.is_more_general_or_equal(candidate, value) {
                        depth_qualifies = true;
                        candidates.push(candidate);
                    }
                }
                if depth_qualifies {
                    break;
                }
                let mut next = Vec::new();
                for node in frontier {
                    for &parent in domain.parents(node) {
                        if seen.insert(parent) {
                            next.push(parent);
                        }
                    }
                }
                frontier = next;
            }
            per_position.push(candidates);
        }

        let mut out = Vec::new();
        for constraints in cartesian_product(&per_position) {
            let generalized = Hypothesis::new(constraints);
            if generalized.covers_aligned(domain, positive)
                && g.members()
                    .iter()
                    .any(|member| member.is_strictly_more_general(domain, &generalized))
            {
                out.push(generalized);
            }
        }
        Ok(out)
    }

    /// Renders the constraint tuple as `<name, name, ...>`.
    pub fn describe(&self, domain: &Domain) -> String {
        let names: Vec<&str> = self.constraints.iter().map(|&id| domain.name(id)).collect();
        format!("<{}>", names.join(", "))
    }
}

/// Cartesian product of per-position candidate lists in odometer order.
/// An empty candidate list at any position yields no rows.
fn cartesian_product(choices: &[Vec<NodeId>]) -> Vec<Vec<NodeId>> {
    let mut rows = vec![Vec::new()];
    for position in choices {
        let mut next = Vec::with_capacity(rows.len() * position.len());
        for prefix in &rows {
            for &candidate in position {
                let mut row = prefix.clone();
                row.push(candidate);
                next.push(row);
            }
        }
        rows = next;
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::weather;

    fn instance(domain: &Domain, names: &[&str; 6]) -> Vec<NodeId> {
        weather::instance(domain, names)
    }

    #[test]
    fn test_covers_rejects_arity_mismatch() {
        let domain = weather::weather_domain();
        let all_any = Hypothesis::new((0..domain.arity()).map(|a| domain.any_value(a)).collect());
        let short = vec![domain.any_value(0)];
        match all_any.covers(&domain, &short) {
            Err(SpaceError::ArityMismatch { expected, actual }) => {
                assert_eq!(expected, 6);
                assert_eq!(actual, 1);
            }
            other => panic!("expected arity mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_covers_is_pointwise() {
        let domain = weather::weather_domain();
        let hypothesis = Hypothesis::new(instance(
            &domain,
            &["Sunny", "Hot", "?", "Strong", "?", "?"],
        ));
        let covered = instance(&domain, &["Sunny", "Hot", "Normal", "Strong", "Cool", "Change"]);
        let rejected = instance(&domain, &["Rainy", "Hot", "Normal", "Strong", "Cool", "Change"]);
        assert!(hypothesis.covers(&domain, &covered).unwrap());
        assert!(!hypothesis.covers(&domain, &rejected).unwrap());
    }

    #[test]
    fn test_partial_order_strictness() {
        let domain = weather::weather_domain();
        let general = Hypothesis::new(instance(&domain, &["Sunny", "?", "?", "?", "?", "?"]));
        let specific = Hypothesis::new(instance(
            &domain,
            &["Sunny", "Hot", "?", "Strong", "?", "?"],
        ));
        assert!(general.is_more_general_or_equal(&domain, &specific));
        assert!(general.is_strictly_more_general(&domain, &specific));
        assert!(!specific.is_more_general_or_equal(&domain, &general));
        assert!(general.is_more_general_or_equal(&domain, &general));
        assert!(!general.is_strictly_more_general(&domain, &general));
    }

    #[test]
    fn test_minimal_specializations_match_classic_step() {
        let domain = weather::weather_domain();
        let all_any = Hypothesis::new((0..domain.arity()).map(|a| domain.any_value(a)).collect());
        let s = BoundarySet::new(vec![Hypothesis::new(instance(
            &domain,
            &["Sunny", "Hot", "?", "Strong", "Warm", "Same"],
        ))]);
        let negative = instance(&domain, &["Rainy", "Cold", "High", "Strong", "Warm", "Change"]);

        let specializations = all_any
            .minimal_specializations(&domain, &negative, &s)
            .unwrap();
        let rendered: Vec<String> = specializations
            .iter()
            .map(|h| h.describe(&domain))
            .collect();
        assert_eq!(
            rendered,
            vec![
                "<Sunny, ?, ?, ?, ?, ?>",
                "<?, Hot, ?, ?, ?, ?>",
                "<?, ?, ?, ?, ?, Same>",
            ]
        );
    }

    #[test]
    fn test_minimal_specializations_skip_covering_depths() {
        // One qualifying candidate at the first depth halts descent for the
        // whole frontier even though other candidates at that depth cover.
        let mut domain = Domain::new();
        let a = domain.add_attribute("A");
        domain.add_value(a, "x", &[]);
        domain.add_value(a, "y", &[]);
        let all_any = Hypothesis::new(vec![domain.any_value(a)]);
        let x = domain.lookup(a, "x").unwrap();
        let y = domain.lookup(a, "y").unwrap();
        let s = BoundarySet::new(vec![Hypothesis::new(vec![domain.no_value(a)])]);

        let specializations = all_any
            .minimal_specializations(&domain, &[x], &s)
            .unwrap();
        // Depth one holds both values; only y rejects the negative. The `_`
        // sentinel at depth two is never visited.
        assert_eq!(specializations, vec![Hypothesis::new(vec![y])]);
    }

    #[test]
    fn test_minimal_generalizations_single_lift() {
        let domain = weather::weather_domain();
        let g = BoundarySet::new(vec![Hypothesis::new(
            (0..domain.arity()).map(|a| domain.any_value(a)).collect(),
        )]);
        let s1 = Hypothesis::new(instance(
            &domain,
            &["Sunny", "Hot", "Normal", "Strong", "Warm", "Same"],
        ));
        let positive = instance(&domain, &["Sunny", "Hot", "High", "Strong", "Warm", "Same"]);

        let generalizations = s1.minimal_generalizations(&domain, &positive, &g).unwrap();
        assert_eq!(generalizations.len(), 1);
        assert_eq!(
            generalizations[0].describe(&domain),
            "<Sunny, Hot, ?, Strong, Warm, Same>"
        );
    }

    #[test]
    fn test_minimal_generalizations_from_no_value_seed() {
        // The seed hypothesis of S lifts each `_` to the concrete value of
        // the first positive example, not all the way to `?`.
        let domain = weather::weather_domain();
        let g = BoundarySet::new(vec![Hypothesis::new(
            (0..domain.arity()).map(|a| domain.any_value(a)).collect(),
        )]);
        let seed = Hypothesis::new((0..domain.arity()).map(|a| domain.no_value(a)).collect());
        let positive = instance(&domain, &["Sunny", "Hot", "Normal", "Strong", "Warm", "Same"]);

        let generalizations = seed.minimal_generalizations(&domain, &positive, &g).unwrap();
        assert_eq!(generalizations.len(), 1);
        assert_eq!(
            generalizations[0].describe(&domain),
            "<Sunny, Hot, Normal, Strong, Warm, Same>"
        );
    }

    #[test]
    fn test_generalization_filtered_without_more_general_g_member() {
        // `<?>` covers the example but no G member sits strictly above it,
        // so the candidate falls outside the version-space interior.
        let mut domain = Domain::new();
        let a = domain.add_attribute("A");
        let x = domain.add_value(a, "x", &[]);
        let g = BoundarySet::new(vec![Hypothesis::new(vec![x])]);
        let hypothesis = Hypothesis::new(vec![domain.any_value(a)]);
        let out = hypothesis.minimal_generalizations(&domain, &[x], &g).unwrap();
        assert!(out.is_empty());
    }
}
