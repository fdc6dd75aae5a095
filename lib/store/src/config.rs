use askql_compiler::{CompilerOptions, ConfigError};
use askql_model::vocab::DEFAULT_WIKI_IRI;
use askql_model::DataItemKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Holds the configuration of a [`SparqlStore`](crate::SparqlStore).
///
/// The compiler options are flattened into the same JSON object:
///
/// ```
/// use askql_store::StoreConfig;
///
/// let config = StoreConfig::from_json(
///     r#"{"limit": 20, "property_types": {"Population": "number"}, "redirect_resolution": false}"#,
/// )?;
/// assert_eq!(config.limit, Some(20));
/// assert!(!config.compiler.redirect_resolution);
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// The IRI that page resources are minted below.
    pub wiki_iri: String,
    /// The limit of queries that do not set one.
    pub limit: Option<usize>,
    /// Property kinds declared up front, by property key or label.
    pub property_types: BTreeMap<String, DataItemKind>,
    /// The options of the condition compiler.
    #[serde(flatten)]
    pub compiler: CompilerOptions,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            wiki_iri: DEFAULT_WIKI_IRI.to_owned(),
            limit: None,
            property_types: BTreeMap::new(),
            compiler: CompilerOptions::default(),
        }
    }
}

impl StoreConfig {
    /// Reads a configuration from JSON. Missing fields take their default value.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()
    }

    /// Checks the compiler options.
    pub fn validate(self) -> Result<Self, ConfigError> {
        Ok(Self {
            compiler: self.compiler.validate()?,
            ..self
        })
    }

    #[must_use]
    pub fn with_wiki_iri(mut self, wiki_iri: impl Into<String>) -> Self {
        self.wiki_iri = wiki_iri.into();
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn with_property_type(mut self, property: impl Into<String>, kind: DataItemKind) -> Self {
        self.property_types.insert(property.into(), kind);
        self
    }

    #[must_use]
    pub fn with_compiler_options(mut self, compiler: CompilerOptions) -> Self {
        self.compiler = compiler;
        self
    }
}
