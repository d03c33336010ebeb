//! ID3: recursive entropy-driven induction of a classification tree.
//!
//! Rows are plain name/value maps. At each node the attribute with the
//! highest information gain (entropy in bits) is chosen as the test; ties
//! break on the attribute name so induction is reproducible. Rows missing
//! the test attribute fall back to its modal value, and every test node
//! carries a majority-class fallback branch for values unseen at fit time.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A categorical example: attribute name to value, target included.
pub type Row = BTreeMap<String, String>;

#[derive(Debug, Clone)]
enum Classifier {
    Leaf(String),
    Test {
        attribute: String,
        branches: BTreeMap<String, Node>,
        default_value: String,
        fallback: Box<Node>,
    },
}

#[derive(Debug, Clone)]
struct Node {
    classifier: Classifier,
}

impl Node {
    fn classify(&self, instance: &Row) -> &str {
        match &self.classifier {
            Classifier::Leaf(class) => class,
            Classifier::Test {
                attribute,
                branches,
                default_value,
                fallback,
            } => {
                let value = instance
                    .get(attribute)
                    .map(String::as_str)
                    .unwrap_or(default_value);
                match branches.get(value) {
                    Some(child) => child.classify(instance),
                    None => fallback.classify(instance),
                }
            }
        }
    }

    fn write_rules(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        match &self.classifier {
            Classifier::Leaf(class) => write!(f, "{}", class),
            Classifier::Test {
                attribute,
                branches,
                default_value,
                fallback,
            } => {
                let indentation = "\t".repeat(indent);
                if indent != 0 {
                    writeln!(f)?;
                }
                for (i, (value, child)) in branches.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    let keyword = if i == 0 { "IF" } else { "ELIF" };
                    write!(f, "{}{} {} = {}", indentation, keyword, attribute, value)?;
                    if value == default_value {
                        write!(f, " (default)")?;
                    }
                    write!(f, " THEN ")?;
                    child.write_rules(f, indent + 1)?;
                }
                writeln!(f)?;
                write!(f, "{}ELSE ", indentation)?;
                fallback.write_rules(f, indent + 1)
            }
        }
    }
}

/// Errors raised while fitting a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// No training rows were supplied.
    EmptyDataset,
    /// A row lacks the target attribute.
    MissingTarget { row: usize },
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::EmptyDataset => write!(f, "decision tree needs at least one training row"),
            TreeError::MissingTarget { row } => {
                write!(f, "training row {} is missing the target attribute", row)
            }
        }
    }
}

impl std::error::Error for TreeError {}

/// A fitted ID3 decision tree.
#[derive(Debug, Clone)]
pub struct DecisionTree {
    target: String,
    root: Node,
}

impl DecisionTree {
    /// Fits a tree predicting `target` from every other attribute seen in
    /// the rows.
    pub fn fit(examples: &[Row], target: &str) -> Result<Self, TreeError> {
        if examples.is_empty() {
            return Err(TreeError::EmptyDataset);
        }
        for (index, row) in examples.iter().enumerate() {
            if !row.contains_key(target) {
                return Err(TreeError::MissingTarget { row: index });
            }
        }

        let mut attributes: BTreeSet<String> = examples
            .iter()
            .flat_map(|row| row.keys().cloned())
            .collect();
        attributes.remove(target);

        let rows: Vec<&Row> = examples.iter().collect();
        let root = id3(&rows, target, &attributes);
        Ok(Self {
            target: target.to_string(),
            root,
        })
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Predicts the target value for an instance, following default and
    /// fallback branches for missing or unseen attribute values.
    pub fn classify(&self, instance: &Row) -> &str {
        self.root.classify(instance)
    }
}

impl fmt::Display for DecisionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[Target Attribute is '{}']", self.target)?;
        self.root.write_rules(f, 0)
    }
}

fn id3(examples: &[&Row], target: &str, attributes: &BTreeSet<String>) -> Node {
    let target_counts = value_counts(examples, target);
    if target_counts.len() == 1 {
        return Node {
            classifier: Classifier::Leaf(majority(&target_counts)),
        };
    }

    let split = best_split(examples, target, attributes);
    let (attribute, default_value) = match split {
        Some(split) => split,
        None => {
            return Node {
                classifier: Classifier::Leaf(majority(&target_counts)),
            }
        }
    };

    let mut remaining = attributes.clone();
    remaining.remove(&attribute);

    let observed: BTreeSet<&str> = examples
        .iter()
        .map(|row| row.get(&attribute).map(String::as_str).unwrap_or(&default_value))
        .collect();

    let mut branches = BTreeMap::new();
    for value in observed {
        let subset: Vec<&Row> = examples
            .iter()
            .copied()
            .filter(|row| row.get(&attribute).map(String::as_str).unwrap_or(&default_value) == value)
            .collect();
        branches.insert(value.to_string(), id3(&subset, target, &remaining));
    }

    let fallback = Box::new(Node {
        classifier: Classifier::Leaf(majority(&target_counts)),
    });
    Node {
        classifier: Classifier::Test {
            attribute,
            branches,
            default_value,
            fallback,
        },
    }
}

/// Attribute with maximal information gain and its modal value, or `None`
/// when no candidate attribute appears in any row.
fn best_split(
    examples: &[&Row],
    target: &str,
    attributes: &BTreeSet<String>,
) -> Option<(String, String)> {
    let mut best: Option<(f64, String, String)> = None;
    for attribute in attributes {
        let counts = value_counts(examples, attribute);
        if counts.is_empty() {
            continue;
        }
        let default_value = majority(&counts);
        let gain = information_gain(examples, attribute, &default_value, target);
        let better = match &best {
            Some((best_gain, _, _)) => gain > *best_gain,
            None => true,
        };
        if better {
            best = Some((gain, attribute.clone(), default_value));
        }
    }
    best.map(|(_, attribute, default_value)| (attribute, default_value))
}

fn information_gain(examples: &[&Row], attribute: &str, default_value: &str, target: &str) -> f64 {
    let old_entropy = entropy(examples, target);
    let total = examples.len() as f64;
    let observed: BTreeSet<&str> = examples
        .iter()
        .map(|row| row.get(attribute).map(String::as_str).unwrap_or(default_value))
        .collect();
    let mut new_entropy = 0.0;
    for value in observed {
        let subset: Vec<&Row> = examples
            .iter()
            .copied()
            .filter(|row| row.get(attribute).map(String::as_str).unwrap_or(default_value) == value)
            .collect();
        new_entropy += (subset.len() as f64 / total) * entropy(&subset, target);
    }
    old_entropy - new_entropy
}

fn entropy(examples: &[&Row], target: &str) -> f64 {
    let counts = value_counts(examples, target);
    let total = examples.len() as f64;
    counts
        .values()
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum()
}

fn value_counts<'a>(examples: &[&'a Row], attribute: &str) -> BTreeMap<&'a str, usize> {
    let mut counts = BTreeMap::new();
    for row in examples {
        if let Some(value) = row.get(attribute) {
            *counts.entry(value.as_str()).or_insert(0) += 1;
        }
    }
    counts
}

/// Most frequent value; ties break to the lexicographically first one.
fn majority(counts: &BTreeMap<&str, usize>) -> String {
    counts
        .iter()
        .max_by(|(name_a, count_a), (name_b, count_b)| {
            count_a.cmp(count_b).then(name_b.cmp(name_a))
        })
        .map(|(name, _)| name.to_string())
        .unwrap_or_default()
}
