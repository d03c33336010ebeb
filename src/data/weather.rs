//! The classic EnjoySport weather concept over six attributes.

use crate::space::{Domain, NodeId};

/// Attribute names in example-vector order.
pub const ATTRIBUTES: [&str; 6] = ["Sky", "AirTemp", "Humidity", "Wind", "Water", "Forecast"];

const VALUES: [&[&str]; 6] = [
    &["Sunny", "Cloudy", "Rainy"],
    &["Hot", "Cold"],
    &["Normal", "High"],
    &["Strong", "Weak"],
    &["Warm", "Cool"],
    &["Same", "Change"],
];

/// Builds the six-attribute weather domain with its `?`/value/`_` levels.
pub fn weather_domain() -> Domain {
    let mut domain = Domain::new();
    for (name, values) in ATTRIBUTES.iter().zip(VALUES) {
        let attribute = domain.add_attribute(name);
        for value in values {
            domain.add_value(attribute, value, &[]);
        }
    }
    domain
}

/// Resolves a vector of value names against the domain, position by position.
pub fn instance(domain: &Domain, names: &[&str]) -> Vec<NodeId> {
    names
        .iter()
        .enumerate()
        .map(|(attribute, name)| {
            domain
                .lookup(attribute, name)
                .expect("weather value names are fixed at compile time")
        })
        .collect()
}

/// The four labeled training examples of the EnjoySport scenario.
pub fn training_examples(domain: &Domain) -> Vec<(Vec<NodeId>, bool)> {
    vec![
        (
            instance(domain, &["Sunny", "Hot", "Normal", "Strong", "Warm", "Same"]),
            true,
        ),
        (
            instance(domain, &["Sunny", "Hot", "High", "Strong", "Warm", "Same"]),
            true,
        ),
        (
            instance(domain, &["Rainy", "Cold", "High", "Strong", "Warm", "Change"]),
            false,
        ),
        (
            instance(domain, &["Sunny", "Hot", "High", "Strong", "Cool", "Change"]),
            true,
        ),
    ]
}

/// Follow-up query instances used after learning.
pub fn query_instances(domain: &Domain) -> Vec<Vec<NodeId>> {
    vec![
        instance(domain, &["Sunny", "Hot", "Normal", "Strong", "Cool", "Change"]),
        instance(domain, &["Rainy", "Cold", "Normal", "Weak", "Warm", "Same"]),
        instance(domain, &["Sunny", "Hot", "Normal", "Weak", "Warm", "Same"]),
        instance(domain, &["Sunny", "Cold", "Normal", "Strong", "Warm", "Same"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_shape() {
        let domain = weather_domain();
        assert_eq!(domain.arity(), 6);
        // Three concrete values for Sky, two for everything else, plus the
        // two sentinels per attribute.
        assert_eq!(domain.attribute_nodes(0).len(), 5);
        assert_eq!(domain.attribute_nodes(1).len(), 4);
    }

    #[test]
    fn test_examples_resolve() {
        let domain = weather_domain();
        let examples = training_examples(&domain);
        assert_eq!(examples.len(), 4);
        assert!(examples.iter().all(|(example, _)| example.len() == 6));
        assert_eq!(query_instances(&domain).len(), 4);
    }
}
