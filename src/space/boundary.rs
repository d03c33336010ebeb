//! Boundary sets of the version space.
//!
//! S holds the maximally-specific consistent hypotheses and G the
//! maximally-general ones. Both are antichains: after every mutating
//! operation any member subsumed inside its own set is pruned away.

use std::collections::HashSet;

use crate::space::hypothesis::Hypothesis;
use crate::space::taxonomy::{Domain, NodeId};
use crate::space::SpaceError;

/// An antichain of hypotheses, mutated only through the operations below.
#[derive(Debug, Clone, Default)]
pub struct BoundarySet {
    members: Vec<Hypothesis>,
}

impl BoundarySet {
    pub fn new(members: Vec<Hypothesis>) -> Self {
        Self { members }
    }

    pub fn members(&self) -> &[Hypothesis] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Drops members inconsistent with a labeled example: on a positive
    /// example every non-covering member goes, on a negative one every
    /// covering member goes. Pure filter, no generation. On error the set
    /// is left unchanged.
    pub fn remove_inconsistent(
        &mut self,
        domain: &Domain,
        example: &[NodeId],
        label: bool,
    ) -> Result<(), SpaceError> {
        let mut kept = Vec::with_capacity(self.members.len());
        for member in &self.members {
            if member.covers(domain, example)? == label {
                kept.push(member.clone());
            }
        }
        self.members = kept;
        Ok(())
    }

    /// S-side transition for a positive example: members that fail to cover
    /// it are replaced by their minimal generalizations against `g`, the
    /// rest stay, and the result is pruned to its most specific members.
    /// On error the set is left unchanged.
    pub fn generalize(
        &mut self,
        domain: &Domain,
        positive: &[NodeId],
        g: &BoundarySet,
    ) -> Result<(), SpaceError> {
        let mut replaced = Vec::new();
        for member in &self.members {
            if member.covers(domain, positive)? {
                replaced.push(member.clone());
            } else {
                replaced.extend(member.minimal_generalizations(domain, positive, g)?);
            }
        }
        self.members = prune(domain, replaced, Keep::MostSpecific);
        Ok(())
    }

    /// G-side transition for a negative example: members that cover it are
    /// replaced by their minimal specializations against `s`, the rest stay,
    /// and the result is pruned to its most general members. On error the
    /// set is left unchanged.
    pub fn specialize(
        &mut self,
        domain: &Domain,
        negative: &[NodeId],
        s: &BoundarySet,
    ) -> Result<(), SpaceError> {
        let mut replaced = Vec::new();
        for member in &self.members {
            if member.covers(domain, negative)? {
                replaced.extend(member.minimal_specializations(domain, negative, s)?);
            } else {
                replaced.push(member.clone());
            }
        }
        self.members = prune(domain, replaced, Keep::MostGeneral);
        Ok(())
    }

    /// Renders the member list as `{<...>, <...>}`.
    pub fn describe(&self, domain: &Domain) -> String {
        let rendered: Vec<String> = self.members.iter().map(|h| h.describe(domain)).collect();
        format!("{{{}}}", rendered.join(", "))
    }
}

#[derive(Clone, Copy)]
enum Keep {
    MostSpecific,
    MostGeneral,
}

/// Deduplicates and removes every member ordered under another member,
/// leaving a maximal antichain in first-seen order.
fn prune(domain: &Domain, members: Vec<Hypothesis>, keep: Keep) -> Vec<Hypothesis> {
    let mut unique: Vec<Hypothesis> = Vec::with_capacity(members.len());
    let mut seen: HashSet<Hypothesis> = HashSet::with_capacity(members.len());
    for member in members {
        if seen.insert(member.clone()) {
            unique.push(member);
        }
    }
    unique
        .iter()
        .filter(|member| {
            !unique.iter().any(|other| match keep {
                Keep::MostSpecific => member.is_strictly_more_general(domain, other),
                Keep::MostGeneral => other.is_strictly_more_general(domain, member),
            })
        })
        .cloned()
        .collect()
}
