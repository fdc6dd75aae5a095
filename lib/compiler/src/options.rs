use crate::ConfigError;
use askql_model::Property;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The direction of a sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_uppercase().as_str() {
            "ASC" | "ASCENDING" => Ok(Self::Asc),
            "DESC" | "DESCENDING" => Ok(Self::Desc),
            _ => Err(ConfigError::InvalidSortDirection(value.to_owned())),
        }
    }
}

impl Display for SortDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        })
    }
}

/// Holds the configuration of the condition compiler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerOptions {
    /// Whether property conditions also match values of declared sub-properties.
    pub subproperty_closure: bool,
    /// Whether category conditions also match members of declared sub-categories.
    pub subcategory_closure: bool,
    /// Whether page values also match pages that redirect to the same target.
    pub redirect_resolution: bool,
    /// How deep concepts may be nested in each other.
    pub max_recursion_depth: usize,
    /// The properties to order the results by, in order of precedence. The empty key orders by
    /// the result page itself.
    pub sort_keys: IndexMap<String, SortDirection>,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            subproperty_closure: true,
            subcategory_closure: true,
            redirect_resolution: true,
            max_recursion_depth: 10,
            sort_keys: IndexMap::new(),
        }
    }
}

impl CompilerOptions {
    /// Reads options from JSON. Missing fields take their default value.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()
    }

    /// Checks the options and brings the sort keys into their canonical property-key form.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.max_recursion_depth == 0 {
            return Err(ConfigError::InvalidRecursionDepth);
        }
        let sort_keys = self
            .sort_keys
            .into_iter()
            .map(|(key, direction)| (sort_key_for(&key), direction))
            .collect();
        Ok(Self { sort_keys, ..self })
    }

    /// Adds a sort key for a property given by key or label.
    #[must_use]
    pub fn with_sort_key(mut self, property: &str, direction: SortDirection) -> Self {
        self.sort_keys.insert(sort_key_for(property), direction);
        self
    }

    #[must_use]
    pub fn with_subproperty_closure(mut self, enabled: bool) -> Self {
        self.subproperty_closure = enabled;
        self
    }

    #[must_use]
    pub fn with_subcategory_closure(mut self, enabled: bool) -> Self {
        self.subcategory_closure = enabled;
        self
    }

    #[must_use]
    pub fn with_redirect_resolution(mut self, enabled: bool) -> Self {
        self.redirect_resolution = enabled;
        self
    }

    #[must_use]
    pub fn with_max_recursion_depth(mut self, max_recursion_depth: usize) -> Self {
        self.max_recursion_depth = max_recursion_depth;
        self
    }

    pub fn is_sort_key(&self, property_key: &str) -> bool {
        self.sort_keys.contains_key(property_key)
    }
}

fn sort_key_for(property: &str) -> String {
    if property.trim().is_empty() {
        String::new()
    } else {
        Property::new(property).key().to_owned()
    }
}
