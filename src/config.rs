//! Domain and dataset configuration via TOML files.
//!
//! A configuration describes the attribute taxonomies of a learning problem
//! (concrete values plus optional intermediate groups, per `[[attribute]]`
//! table) and, optionally, labeled `[[example]]` tables resolved against the
//! built domain.

use std::fs;
use std::path::Path;

use serde::Serialize;
use toml::Value;

use crate::space::{Domain, NodeId};

/// One attribute taxonomy: concrete leaf-level values plus optional
/// intermediate groups between the `?` root and their member values.
#[derive(Debug, Clone, Serialize)]
pub struct AttributeConfig {
    pub name: String,
    pub values: Vec<String>,
    /// Group name and member values, in deterministic (sorted) order.
    pub groups: Vec<(String, Vec<String>)>,
}

/// A labeled example given by value names, positionally aligned with the
/// attribute list.
#[derive(Debug, Clone, Serialize)]
pub struct ExampleConfig {
    pub values: Vec<String>,
    pub label: bool,
}

/// Parsed domain description.
///
/// # Examples
///
/// ```
/// use concept_learning_core::DomainConfig;
///
/// let toml = r#"
/// [domain]
/// name = "sky_demo"
///
/// [[attribute]]
/// name = "Sky"
/// values = ["Sunny", "Rainy", "Snowy"]
///
/// [attribute.groups]
/// Precipitation = ["Rainy", "Snowy"]
///
/// [[attribute]]
/// name = "Wind"
/// values = ["Strong", "Weak"]
///
/// [[example]]
/// values = ["Sunny", "Strong"]
/// label = true
/// "#;
/// let config = DomainConfig::from_str(toml).unwrap();
/// let domain = config.build();
/// assert_eq!(domain.arity(), 2);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct DomainConfig {
    pub name: String,
    pub attributes: Vec<AttributeConfig>,
    pub examples: Vec<ExampleConfig>,
}

impl DomainConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(&path)?;
        Self::from_str(&contents)
    }

    pub fn from_str(toml_str: &str) -> Result<Self, ConfigError> {
        let value: Value =
            toml::from_str(toml_str).map_err(|err| ConfigError::Parse(err.to_string()))?;

        let name = value
            .get("domain")
            .and_then(|domain| domain.get("name"))
            .and_then(|name| name.as_str())
            .unwrap_or("unnamed")
            .to_string();

        let attribute_tables = value
            .get("attribute")
            .and_then(|v| v.as_array())
            .filter(|tables| !tables.is_empty())
            .ok_or_else(|| {
                ConfigError::Parse("at least one [[attribute]] table is required".into())
            })?;

        let mut attributes = Vec::with_capacity(attribute_tables.len());
        for table in attribute_tables {
            attributes.push(Self::parse_attribute(table)?);
        }

        let examples = value
            .get("example")
            .and_then(|v| v.as_array())
            .map(|tables| {
                tables
                    .iter()
                    .map(Self::parse_example)
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            name,
            attributes,
            examples,
        })
    }

    fn parse_attribute(table: &Value) -> Result<AttributeConfig, ConfigError> {
        let name = table
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ConfigError::Parse("attribute is missing a name".into()))?
            .to_string();

        let values: Vec<String> = table
            .get("values")
            .and_then(|v| v.as_array())
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.as_str())
                    .map(str::to_string)
                    .collect()
            })
            .filter(|values: &Vec<String>| !values.is_empty())
            .ok_or_else(|| {
                ConfigError::Parse(format!(
                    "attribute '{}' needs a non-empty values array",
                    name
                ))
            })?;

        for (i, value) in values.iter().enumerate() {
            if values[..i].contains(value) {
                return Err(ConfigError::Parse(format!(
                    "attribute '{}' lists value '{}' twice",
                    name, value
                )));
            }
        }

        let mut groups = Vec::new();
        if let Some(group_table) = table.get("groups").and_then(|v| v.as_table()) {
            for (group_name, members) in group_table {
                if values.contains(group_name) {
                    return Err(ConfigError::Parse(format!(
                        "attribute '{}' uses '{}' as both a value and a group",
                        name, group_name
                    )));
                }
                let members: Vec<String> = members
                    .as_array()
                    .map(|items| {
                        items
                            .iter()
                            .filter_map(|item| item.as_str())
                            .map(str::to_string)
                            .collect()
                    })
                    .filter(|members: &Vec<String>| !members.is_empty())
                    .ok_or_else(|| {
                        ConfigError::Parse(format!(
                            "group '{}' of attribute '{}' needs a non-empty member array",
                            group_name, name
                        ))
                    })?;
                for member in &members {
                    if !values.contains(member) {
                        return Err(ConfigError::Parse(format!(
                            "group '{}' of attribute '{}' references unknown value '{}'",
                            group_name, name, member
                        )));
                    }
                }
                groups.push((group_name.clone(), members));
            }
        }

        Ok(AttributeConfig {
            name,
            values,
            groups,
        })
    }

    fn parse_example(table: &Value) -> Result<ExampleConfig, ConfigError> {
        let values: Vec<String> = table
            .get("values")
            .and_then(|v| v.as_array())
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.as_str())
                    .map(str::to_string)
                    .collect()
            })
            .ok_or_else(|| ConfigError::Parse("example is missing a values array".into()))?;
        let label = table
            .get("label")
            .and_then(|v| v.as_bool())
            .ok_or_else(|| ConfigError::Parse("example is missing a boolean label".into()))?;
        Ok(ExampleConfig { values, label })
    }

    /// Builds the taxonomy arena: per attribute one `?` root and one `_`
    /// leaf, groups directly under the root, and every concrete value under
    /// its groups (or the root when ungrouped).
    pub fn build(&self) -> Domain {
        let mut domain = Domain::new();
        for attribute_config in &self.attributes {
            let attribute = domain.add_attribute(&attribute_config.name);
            let group_ids: Vec<NodeId> = attribute_config
                .groups
                .iter()
                .map(|(group_name, _)| domain.add_group(attribute, group_name, &[]))
                .collect();
            for value in &attribute_config.values {
                let parents: Vec<NodeId> = attribute_config
                    .groups
                    .iter()
                    .zip(&group_ids)
                    .filter(|((_, members), _)| members.contains(value))
                    .map(|(_, &id)| id)
                    .collect();
                domain.add_value(attribute, value, &parents);
            }
        }
        domain
    }

    /// Resolves the configured examples against a built domain by
    /// attribute-wise name lookup.
    pub fn resolve_examples(
        &self,
        domain: &Domain,
    ) -> Result<Vec<(Vec<NodeId>, bool)>, ConfigError> {
        let mut resolved = Vec::with_capacity(self.examples.len());
        for (index, example) in self.examples.iter().enumerate() {
            if example.values.len() != domain.arity() {
                return Err(ConfigError::Parse(format!(
                    "example {} has {} values but the domain has {} attributes",
                    index,
                    example.values.len(),
                    domain.arity()
                )));
            }
            let mut instance = Vec::with_capacity(example.values.len());
            for (attribute, value) in example.values.iter().enumerate() {
                let id = domain.lookup(attribute, value).ok_or_else(|| {
                    ConfigError::Parse(format!(
                        "example {} references unknown value '{}' for attribute '{}'",
                        index,
                        value,
                        domain.attribute_name(attribute)
                    ))
                })?;
                instance.push(id);
            }
            resolved.push((instance, example.label));
        }
        Ok(resolved)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "IO error: {}", err),
            ConfigError::Parse(err) => write!(f, "Parse error: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SKY_TOML: &str = r#"
[domain]
name = "sky_demo"

[[attribute]]
name = "Sky"
values = ["Sunny", "Rainy", "Snowy"]

[attribute.groups]
Precipitation = ["Rainy", "Snowy"]

[[attribute]]
name = "Wind"
values = ["Strong", "Weak"]

[[example]]
values = ["Sunny", "Strong"]
label = true

[[example]]
values = ["Rainy", "Weak"]
label = false
"#;

    #[test]
    fn test_parses_attributes_groups_and_examples() {
        let config = DomainConfig::from_str(SKY_TOML).unwrap();
        assert_eq!(config.name, "sky_demo");
        assert_eq!(config.attributes.len(), 2);
        assert_eq!(config.attributes[0].groups.len(), 1);
        assert_eq!(config.examples.len(), 2);
        assert!(config.examples[0].label);
    }

    #[test]
    fn test_build_creates_group_edges() {
        let config = DomainConfig::from_str(SKY_TOML).unwrap();
        let domain = config.build();
        let precipitation = domain.lookup(0, "Precipitation").unwrap();
        let rainy = domain.lookup(0, "Rainy").unwrap();
        let sunny = domain.lookup(0, "Sunny").unwrap();
        assert!(domain.is_strictly_more_general(precipitation, rainy));
        assert!(!domain.is_more_general_or_equal(precipitation, sunny));
        assert!(domain.is_strictly_more_general(domain.any_value(0), precipitation));
    }

    #[test]
    fn test_resolve_examples() {
        let config = DomainConfig::from_str(SKY_TOML).unwrap();
        let domain = config.build();
        let examples = config.resolve_examples(&domain).unwrap();
        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0].0[0], domain.lookup(0, "Sunny").unwrap());
        assert!(!examples[1].1);
    }

    #[test]
    fn test_missing_attributes_is_an_error() {
        let err = DomainConfig::from_str("[domain]\nname = \"empty\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_group_with_unknown_member_is_an_error() {
        let toml = r#"
[[attribute]]
name = "Sky"
values = ["Sunny"]

[attribute.groups]
Precipitation = ["Rainy"]
"#;
        let err = DomainConfig::from_str(toml).unwrap_err();
        assert!(err.to_string().contains("unknown value 'Rainy'"));
    }

    #[test]
    fn test_example_with_wrong_arity_is_an_error() {
        let toml = r#"
[[attribute]]
name = "Sky"
values = ["Sunny"]

[[example]]
values = ["Sunny", "Strong"]
label = true
"#;
        let config = DomainConfig::from_str(toml).unwrap();
        let domain = config.build();
        assert!(config.resolve_examples(&domain).is_err());
    }
}
