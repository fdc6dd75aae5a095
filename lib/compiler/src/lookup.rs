//! The collaborators the builder consults while compiling. Every collaborator is optional: a
//! builder without one simply does not use the feature it enables.

use askql_model::{AskParseError, AskParser, Description, NamedNode, WikiPage};
use std::sync::Arc;

/// The resource a resource is redirected to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget {
    /// The target of the redirect, or the resource itself if it is not redirected.
    pub target: NamedNode,
    /// Whether the store knows anything about the resource.
    pub existed: bool,
}

impl RedirectTarget {
    pub fn is_redirect(&self, resource: &NamedNode) -> bool {
        self.target != *resource
    }
}

/// Resolves redirected resources to their target.
pub trait RedirectLookup: Send + Sync {
    fn target_of(&self, resource: &NamedNode) -> RedirectTarget;
}

pub type RedirectLookupRef = Arc<dyn RedirectLookup>;

/// Answers whether properties and categories have declared children.
pub trait HierarchyLookup: Send + Sync {
    /// Whether any property is declared a sub-property of `property`.
    fn has_subproperty_for(&self, property: &NamedNode) -> bool;

    /// Whether any category is declared a sub-category of `category`.
    fn has_subcategory_for(&self, category: &NamedNode) -> bool;
}

pub type HierarchyLookupRef = Arc<dyn HierarchyLookup>;

/// Provides the stored query of concept pages.
pub trait ConceptLookup: Send + Sync {
    /// The most recent query text defined for the concept.
    fn concept_query_text(&self, concept: &WikiPage) -> Option<String>;
}

pub type ConceptLookupRef = Arc<dyn ConceptLookup>;

/// Turns stored query texts into descriptions.
pub trait DescriptionParser: Send + Sync {
    fn parse_description(&self, query: &str) -> Result<Description, AskParseError>;
}

pub type DescriptionParserRef = Arc<dyn DescriptionParser>;

impl DescriptionParser for AskParser {
    fn parse_description(&self, query: &str) -> Result<Description, AskParseError> {
        self.parse(query)
    }
}
