//! Generalization hierarchies for attribute values.
//!
//! Every attribute of a learning problem carries a taxonomy: a finite DAG
//! from the "any value" root `?` down to the "no value" leaf `_`, with the
//! concrete values (and optional intermediate groups) in between. All nodes
//! of all attributes live in one arena owned by a [`Domain`], so a node is
//! identified by a cheap [`NodeId`] and two nodes with the same display name
//! under different attributes stay distinct.

use std::collections::HashSet;

use serde::Serialize;

/// Display name of the "any value" root sentinel.
pub const ANY_VALUE: &str = "?";
/// Display name of the "no value" leaf sentinel.
pub const NO_VALUE: &str = "_";

/// Identifier of a taxonomy node inside a [`Domain`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(u32);

#[derive(Debug, Clone)]
struct Node {
    name: String,
    children: Vec<NodeId>,
    parents: Vec<NodeId>,
}

#[derive(Debug, Clone)]
struct Attribute {
    name: String,
    any: NodeId,
    none: NodeId,
    nodes: Vec<NodeId>,
}

/// Arena of attribute taxonomies for one learning problem.
///
/// A domain is built once, before learning starts, and is read-only
/// afterwards: there is no removal API and edges are only added during
/// construction. Child edges are the forward representation; parent links
/// are recorded on the child at the moment the edge is added.
#[derive(Debug, Clone, Default)]
pub struct Domain {
    nodes: Vec<Node>,
    attributes: Vec<Attribute>,
}

impl Domain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new attribute and creates its `?` and `_` sentinels.
    ///
    /// Returns the attribute index used by [`Domain::add_value`],
    /// [`Domain::add_group`] and the lookup helpers.
    pub fn add_attribute(&mut self, name: &str) -> usize {
        let any = self.push_node(ANY_VALUE);
        let none = self.push_node(NO_VALUE);
        self.attributes.push(Attribute {
            name: name.to_string(),
            any,
            none,
            nodes: vec![any, none],
        });
        self.attributes.len() - 1
    }

    /// Adds an intermediate group node between the root and its members.
    ///
    /// With no explicit `parents` the group hangs directly off the `?` root.
    pub fn add_group(&mut self, attribute: usize, name: &str, parents: &[NodeId]) -> NodeId {
        let id = self.push_node(name);
        self.attach(attribute, id, parents);
        id
    }

    /// Adds a concrete leaf-level value. The value always receives the
    /// attribute's `_` sentinel as its sole child.
    pub fn add_value(&mut self, attribute: usize, name: &str, parents: &[NodeId]) -> NodeId {
        let id = self.push_node(name);
        self.attach(attribute, id, parents);
        let none = self.attributes[attribute].none;
        self.link(id, none);
        id
    }

    fn push_node(&mut self, name: &str) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            name: name.to_string(),
            children: Vec::new(),
            parents: Vec::new(),
        });
        id
    }

    fn attach(&mut self, attribute: usize, id: NodeId, parents: &[NodeId]) {
        if parents.is_empty() {
            let any = self.attributes[attribute].any;
            self.link(any, id);
        } else {
            for &parent in parents {
                self.link(parent, id);
            }
        }
        self.attributes[attribute].nodes.push(id);
    }

    fn link(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0 as usize].children.push(child);
        self.nodes[child.0 as usize].parents.push(parent);
    }

    /// Number of attributes, which is also the arity of every example.
    pub fn arity(&self) -> usize {
        self.attributes.len()
    }

    pub fn attribute_name(&self, attribute: usize) -> &str {
        &self.attributes[attribute].name
    }

    /// The `?` sentinel of an attribute.
    pub fn any_value(&self, attribute: usize) -> NodeId {
        self.attributes[attribute].any
    }

    /// The `_` sentinel of an attribute.
    pub fn no_value(&self, attribute: usize) -> NodeId {
        self.attributes[attribute].none
    }

    /// Every node of an attribute, sentinels included, in insertion order.
    pub fn attribute_nodes(&self, attribute: usize) -> &[NodeId] {
        &self.attributes[attribute].nodes
    }

    pub fn name(&self, id: NodeId) -> &str {
        &self.nodes[id.0 as usize].name
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0 as usize].children
    }

    pub fn parents(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0 as usize].parents
    }

    /// Finds a node of `attribute` by display name.
    pub fn lookup(&self, attribute: usize, name: &str) -> Option<NodeId> {
        self.attributes[attribute]
            .nodes
            .iter()
            .copied()
            .find(|&id| self.name(id) == name)
    }

    /// True if `a` is a strict ancestor of `b` along child edges.
    ///
    /// Breadth-first walk up `b`'s parent links; frontiers keep insertion
    /// order so traversal is reproducible.
    pub fn is_strictly_more_general(&self, a: NodeId, b: NodeId) -> bool {
        let mut frontier = self.parents(b).to_vec();
        let mut seen: HashSet<NodeId> = frontier.iter().copied().collect();
        while !frontier.is_empty() {
            if frontier.contains(&a) {
                return true;
            }
            let mut next = Vec::new();
            for node in frontier {
                for &parent in self.parents(node) {
                    if seen.insert(parent) {
                        next.push(parent);
                    }
                }
            }
            frontier = next;
        }
        false
    }

    /// True if `a` is `b` itself or a strict ancestor of `b`.
    pub fn is_more_general_or_equal(&self, a: NodeId, b: NodeId) -> bool {
        a == b || self.is_strictly_more_general(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sky_domain() -> (Domain, usize) {
        let mut domain = Domain::new();
        let sky = domain.add_attribute("Sky");
        let precipitation = domain.add_group(sky, "Precipitation", &[]);
        domain.add_value(sky, "Rainy", &[precipitation]);
        domain.add_value(sky, "Snowy", &[precipitation]);
        domain.add_value(sky, "Sunny", &[]);
        (domain, sky)
    }

    #[test]
    fn test_parent_links_recorded() {
        let (domain, sky) = sky_domain();
        let precipitation = domain.lookup(sky, "Precipitation").unwrap();
        let rainy = domain.lookup(sky, "Rainy").unwrap();
        assert!(domain.children(precipitation).contains(&rainy));
        assert!(domain.parents(rainy).contains(&precipitation));
        assert_eq!(domain.parents(precipitation), &[domain.any_value(sky)]);
    }

    #[test]
    fn test_sentinels_bound_the_attribute() {
        let (domain, sky) = sky_domain();
        let any = domain.any_value(sky);
        let none = domain.no_value(sky);
        assert_eq!(domain.name(any), ANY_VALUE);
        assert_eq!(domain.name(none), NO_VALUE);
        assert!(domain.is_strictly_more_general(any, none));
        assert!(!domain.is_strictly_more_general(none, any));
    }

    #[test]
    fn test_strictly_more_general_is_transitive() {
        let (domain, sky) = sky_domain();
        let any = domain.any_value(sky);
        let precipitation = domain.lookup(sky, "Precipitation").unwrap();
        let rainy = domain.lookup(sky, "Rainy").unwrap();
        assert!(domain.is_strictly_more_general(any, precipitation));
        assert!(domain.is_strictly_more_general(precipitation, rainy));
        assert!(domain.is_strictly_more_general(any, rainy));
    }

    #[test]
    fn test_more_general_or_equal_is_reflexive_not_strict() {
        let (domain, sky) = sky_domain();
        let sunny = domain.lookup(sky, "Sunny").unwrap();
        assert!(domain.is_more_general_or_equal(sunny, sunny));
        assert!(!domain.is_strictly_more_general(sunny, sunny));
    }

    #[test]
    fn test_siblings_are_unordered() {
        let (domain, sky) = sky_domain();
        let rainy = domain.lookup(sky, "Rainy").unwrap();
        let sunny = domain.lookup(sky, "Sunny").unwrap();
        let precipitation = domain.lookup(sky, "Precipitation").unwrap();
        assert!(!domain.is_more_general_or_equal(rainy, sunny));
        assert!(!domain.is_more_general_or_equal(sunny, rainy));
        assert!(!domain.is_more_general_or_equal(precipitation, sunny));
    }

    #[test]
    fn test_nodes_of_different_attributes_are_distinct() {
        let mut domain = Domain::new();
        let a = domain.add_attribute("A");
        let b = domain.add_attribute("B");
        let a_warm = domain.add_value(a, "Warm", &[]);
        let b_warm = domain.add_value(b, "Warm", &[]);
        assert_ne!(a_warm, b_warm);
        assert!(!domain.is_more_general_or_equal(a_warm, b_warm));
    }
}
