mod grammar;

use crate::parser::grammar::{ask_query, RawChainElement, RawNode, RawValue};
use crate::{
    namespace_id, AskParseError, DataItem, DataItemKind, Description, Property, WikiPage,
};
use std::collections::HashMap;
use std::sync::Arc;

/// Provides the declared kind of user-defined properties.
pub trait PropertyKindLookup: Send + Sync {
    /// Returns the kind declared for the property key, if any.
    fn kind_of(&self, property_key: &str) -> Option<DataItemKind>;
}

pub type PropertyKindLookupRef = Arc<dyn PropertyKindLookup>;

impl<S: std::hash::BuildHasher + Send + Sync> PropertyKindLookup
    for HashMap<String, DataItemKind, S>
{
    fn kind_of(&self, property_key: &str) -> Option<DataItemKind> {
        self.get(property_key).copied()
    }
}

/// Parses ask queries into [`Description`]s.
///
/// Property values are typed with the kinds reported by the [`PropertyKindLookup`]. Properties
/// without a declared kind hold pages.
#[derive(Clone, Default)]
pub struct AskParser {
    kinds: Option<PropertyKindLookupRef>,
}

impl AskParser {
    pub fn new(kinds: PropertyKindLookupRef) -> Self {
        Self { kinds: Some(kinds) }
    }

    /// Parses the query text.
    ///
    /// ```
    /// use askql_model::AskParser;
    ///
    /// let description = AskParser::default()
    ///     .parse("[[Category:City]] [[Located in::Germany]]")
    ///     .unwrap();
    /// assert_eq!(description.to_string(), "[[Category:City]] [[Located in::Germany]]");
    /// ```
    pub fn parse(&self, query: &str) -> Result<Description, AskParseError> {
        let node = ask_query::query(query).map_err(|error| AskParseError::Syntax {
            location: error.location.to_string(),
            expected: error.expected.to_string(),
        })?;
        self.lower(node)
    }

    fn lower(&self, node: RawNode) -> Result<Description, AskParseError> {
        Ok(match node {
            RawNode::And(nodes) => Description::and(
                nodes
                    .into_iter()
                    .map(|node| self.lower(node))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            RawNode::Or(nodes) => Description::or(
                nodes
                    .into_iter()
                    .map(|node| self.lower(node))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            RawNode::Category(names) => {
                Description::class(names.iter().map(|name| WikiPage::category(name)))
            }
            RawNode::Concept(name) => Description::concept(WikiPage::concept(&name)),
            RawNode::Namespace(name) => Description::Namespace(
                namespace_id(&name).ok_or(AskParseError::UnknownNamespace(name))?,
            ),
            RawNode::Values(values) => self.lower_values(None, values)?,
            RawNode::Property { chain, values } => {
                let mut properties = chain
                    .into_iter()
                    .map(|element| self.property(element))
                    .collect::<Vec<_>>();
                let Some(last) = properties.pop() else {
                    return Err(AskParseError::EmptyValue(String::new()));
                };
                let mut description =
                    Description::some_property(last.clone(), self.lower_values(Some(&last), values)?);
                while let Some(property) = properties.pop() {
                    description = Description::some_property(property, description);
                }
                description
            }
        })
    }

    fn property(&self, element: RawChainElement) -> Property {
        let property = Property::new(&element.name);
        let kind = self
            .kinds
            .as_ref()
            .and_then(|kinds| kinds.kind_of(property.key()))
            .unwrap_or_default();
        property.with_kind(kind).with_inverse(element.inverse)
    }

    fn lower_values(
        &self,
        property: Option<&Property>,
        values: Vec<RawValue>,
    ) -> Result<Description, AskParseError> {
        let mut descriptions = values
            .into_iter()
            .map(|value| self.lower_value(property, value))
            .collect::<Result<Vec<_>, _>>()?;
        if descriptions.len() == 1 {
            if let Some(description) = descriptions.pop() {
                return Ok(description);
            }
        }
        Ok(Description::or(descriptions))
    }

    fn lower_value(
        &self,
        property: Option<&Property>,
        value: RawValue,
    ) -> Result<Description, AskParseError> {
        match value {
            RawValue::Any => Ok(Description::Thing),
            RawValue::Subquery(node) => self.lower(node),
            RawValue::Literal { comparator, text } => {
                if text.is_empty() {
                    return Err(AskParseError::EmptyValue(
                        property.map(Property::label).unwrap_or_default(),
                    ));
                }
                let kind = property.map(Property::kind).unwrap_or_default();
                let data_item = DataItem::parse(kind, &text)?;
                Ok(Description::value(property.cloned(), data_item, comparator))
            }
        }
    }
}
