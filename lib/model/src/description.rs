use crate::{namespace_name, DataItem, Property, WikiPage};
use std::fmt::{Display, Formatter};

/// How a value condition compares stored values against its data item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Comparator {
    #[default]
    Equal,
    Less,
    Greater,
    LessOrEqual,
    GreaterOrEqual,
    NotEqual,
    /// Pattern match with `*` and `?` wildcards.
    Like,
    NotLike,
    /// Pattern match written with the `like:` prefix.
    PrimitiveLike,
    PrimitiveNotLike,
    /// Full-text containment. Needs a full-text index.
    In,
    /// Full-text phrase match. Needs a full-text index.
    Phrase,
    /// Full-text exclusion. Needs a full-text index.
    Not,
}

impl Comparator {
    /// The SPARQL operator used for this comparator. Comparators without an operator are not
    /// translated into a constraint.
    pub fn sparql_operator(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessOrEqual => "<=",
            Self::GreaterOrEqual => ">=",
            Self::NotEqual => "!=",
            Self::Like | Self::PrimitiveLike => "regex",
            Self::NotLike | Self::PrimitiveNotLike => "!regex",
            Self::In | Self::Phrase | Self::Not => "",
        }
    }

    /// The prefix that selects this comparator in a query value.
    pub fn query_prefix(self) -> &'static str {
        match self {
            Self::Equal => "",
            Self::Less => "<<",
            Self::Greater => ">>",
            Self::LessOrEqual => "<",
            Self::GreaterOrEqual => ">",
            Self::NotEqual => "!",
            Self::Like => "~",
            Self::NotLike => "!~",
            Self::PrimitiveLike => "like:",
            Self::PrimitiveNotLike => "nlike:",
            Self::In => "in:",
            Self::Phrase => "phrase:",
            Self::Not => "not:",
        }
    }

    pub fn is_like(self) -> bool {
        matches!(
            self,
            Self::Like | Self::NotLike | Self::PrimitiveLike | Self::PrimitiveNotLike
        )
    }
}

/// A condition on a single value, possibly of a known property.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueDescription {
    pub property: Option<Property>,
    pub data_item: DataItem,
    pub comparator: Comparator,
}

/// Requires the subject to have the property with a value that matches the inner description.
#[derive(Debug, Clone, PartialEq)]
pub struct SomePropertyDescription {
    pub property: Property,
    pub inner: Box<Description>,
}

/// A query description, the input of the compiler.
///
/// The [`Display`] implementation produces the canonical ask-query string of the description.
#[derive(Debug, Clone, PartialEq)]
pub enum Description {
    /// Matches everything.
    Thing,
    /// Members of any of the categories.
    Class(Vec<WikiPage>),
    /// Pages in the namespace.
    Namespace(i32),
    Value(ValueDescription),
    SomeProperty(SomePropertyDescription),
    Conjunction(Vec<Description>),
    Disjunction(Vec<Description>),
    /// The stored query of a concept page.
    Concept(WikiPage),
}

impl Description {
    /// Creates a class description. Duplicate categories are dropped.
    pub fn class(categories: impl IntoIterator<Item = WikiPage>) -> Self {
        let mut unique: Vec<WikiPage> = Vec::new();
        for category in categories {
            if !unique.contains(&category) {
                unique.push(category);
            }
        }
        Self::Class(unique)
    }

    pub fn value(property: Option<Property>, data_item: DataItem, comparator: Comparator) -> Self {
        Self::Value(ValueDescription {
            property,
            data_item,
            comparator,
        })
    }

    pub fn some_property(property: Property, inner: Description) -> Self {
        Self::SomeProperty(SomePropertyDescription {
            property,
            inner: Box::new(inner),
        })
    }

    pub fn concept(page: WikiPage) -> Self {
        Self::Concept(page)
    }

    /// Creates a conjunction. Nested conjunctions are flattened.
    pub fn and(children: impl IntoIterator<Item = Description>) -> Self {
        let mut flat = Vec::new();
        for child in children {
            match child {
                Self::Conjunction(inner) => flat.extend(inner),
                child => flat.push(child),
            }
        }
        Self::Conjunction(flat)
    }

    /// Creates a disjunction. Nested disjunctions are flattened.
    pub fn or(children: impl IntoIterator<Item = Description>) -> Self {
        let mut flat = Vec::new();
        for child in children {
            match child {
                Self::Disjunction(inner) => flat.extend(inner),
                child => flat.push(child),
            }
        }
        Self::Disjunction(flat)
    }

    /// The canonical query string. With `as_value`, the string is written to be used as the
    /// value of a property condition.
    pub fn query_string(&self, as_value: bool) -> String {
        match self {
            Self::Thing => {
                if as_value {
                    "+".to_owned()
                } else {
                    String::new()
                }
            }
            Self::Class(categories) => {
                let names = categories
                    .iter()
                    .map(WikiPage::title)
                    .collect::<Vec<_>>()
                    .join("||");
                subquery(format!("[[Category:{names}]]"), as_value)
            }
            Self::Namespace(id) => {
                let name = match namespace_name(*id) {
                    Some(name) => name.to_owned(),
                    None => id.to_string(),
                };
                subquery(format!("[[{name}:+]]"), as_value)
            }
            Self::Value(value) => {
                let text = format!("{}{}", value.comparator.query_prefix(), value.data_item);
                if as_value {
                    text
                } else {
                    format!("[[{text}]]")
                }
            }
            Self::SomeProperty(some) => {
                let mut chain = some.property.to_string();
                let mut inner = some.inner.as_ref();
                while let Self::SomeProperty(nested) = inner {
                    chain.push('.');
                    chain.push_str(&nested.property.to_string());
                    inner = nested.inner.as_ref();
                }
                subquery(
                    format!("[[{chain}::{}]]", inner.query_string(true)),
                    as_value,
                )
            }
            Self::Conjunction(children) => {
                let text = children
                    .iter()
                    .map(|child| match child {
                        Self::Disjunction(_) => subquery(child.query_string(false), true),
                        _ => child.query_string(false),
                    })
                    .filter(|text| !text.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ");
                subquery(text, as_value)
            }
            Self::Disjunction(children) => {
                let values_only = children
                    .iter()
                    .all(|child| matches!(child, Self::Value(_) | Self::Thing));
                if as_value && values_only {
                    children
                        .iter()
                        .map(|child| child.query_string(true))
                        .collect::<Vec<_>>()
                        .join("||")
                } else {
                    let text = children
                        .iter()
                        .map(|child| match child {
                            Self::Thing => "[[+]]".to_owned(),
                            _ => child.query_string(false),
                        })
                        .collect::<Vec<_>>()
                        .join(" OR ");
                    subquery(text, as_value)
                }
            }
            Self::Concept(page) => format!("[[Concept:{}]]", page.title()),
        }
    }
}

fn subquery(text: String, as_value: bool) -> String {
    if as_value {
        format!("<q>{text}</q>")
    } else {
        text
    }
}

impl Display for Description {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.query_string(false))
    }
}
