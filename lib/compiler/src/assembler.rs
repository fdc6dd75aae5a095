use crate::context::RESULT_VARIABLE;
use crate::variables::replace_variable;
use crate::{Condition, SortDirection};
use askql_model::ExpNamespace;
use indexmap::IndexMap;
use std::fmt::{Display, Formatter};

/// The query text of a compiled ask query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SparqlQuery {
    /// The query has no results. There is nothing to send to a backend.
    Empty,
    /// The query has exactly this result, given by its textual name.
    Constant(String),
    /// Whether the single candidate result satisfies the condition.
    Ask(String),
    /// The results (or their number) of the query.
    Select(String),
}

impl SparqlQuery {
    /// The text that must be evaluated by a SPARQL backend, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Empty | Self::Constant(_) => None,
            Self::Ask(text) | Self::Select(text) => Some(text),
        }
    }
}

impl Display for SparqlQuery {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Constant(name) => f.write_str(name),
            Self::Ask(text) | Self::Select(text) => f.write_str(text),
        }
    }
}

/// The result window of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryOptions {
    pub limit: Option<usize>,
    pub offset: usize,
    /// Count the results instead of listing them. Counting ignores order, limit and offset.
    pub count: bool,
}

impl QueryOptions {
    #[must_use]
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    #[must_use]
    pub fn with_count(mut self, count: bool) -> Self {
        self.count = count;
        self
    }
}

/// Turns a top-level [`Condition`] into SPARQL query text.
#[derive(Debug, Clone, Default)]
pub struct QueryAssembler {
    sort_keys: IndexMap<String, SortDirection>,
}

impl QueryAssembler {
    pub fn new(sort_keys: IndexMap<String, SortDirection>) -> Self {
        Self { sort_keys }
    }

    pub fn assemble(&self, condition: &Condition, options: &QueryOptions) -> SparqlQuery {
        match condition {
            Condition::False => SparqlQuery::Empty,
            Condition::Singleton(singleton) => {
                let text = format!("{}{}", condition.pattern(), condition.weak_condition_text());
                let match_element = singleton.match_element();
                let name = match_element.turtle_name();
                if text.is_empty() {
                    return SparqlQuery::Constant(name);
                }
                let mut namespaces = condition.namespaces().clone();
                if let Some(namespace) = match_element.namespace() {
                    namespaces.insert(namespace);
                }
                SparqlQuery::Ask(format!(
                    "{}ASK {{\n{}}}\n",
                    prefixes(namespaces.iter()),
                    replace_variable(&text, RESULT_VARIABLE, &name)
                ))
            }
            _ => SparqlQuery::Select(self.select(condition, options)),
        }
    }

    fn select(&self, condition: &Condition, options: &QueryOptions) -> String {
        let mut namespaces = condition.namespaces().clone();
        let weak_text = condition.weak_condition_text();
        let mut text = String::new();
        if weak_text.is_empty() && !condition.is_safe() {
            let swivt = ExpNamespace::swivt();
            text = format!("?{RESULT_VARIABLE} {}:page ?url .\n", swivt.prefix());
            namespaces.insert(&swivt);
        }
        // Weak fragments follow the pattern so that optional sort blocks extend its solutions.
        text.push_str(&condition.pattern());
        text.push_str(&weak_text);

        let projection = if options.count {
            format!("(COUNT(DISTINCT ?{RESULT_VARIABLE}) AS ?count)")
        } else {
            format!("DISTINCT ?{RESULT_VARIABLE}")
        };
        let mut query = format!(
            "{}SELECT {projection} WHERE {{\n{text}}}\n",
            prefixes(namespaces.iter())
        );
        if options.count {
            return query;
        }

        let order = self
            .sort_keys
            .iter()
            .filter_map(|(key, direction)| {
                let variable = condition.order_variables().get(key)?;
                Some(format!("{direction}(?{variable})"))
            })
            .collect::<Vec<_>>();
        if !order.is_empty() {
            query.push_str("ORDER BY ");
            query.push_str(&order.join(" "));
            query.push('\n');
        }
        if let Some(limit) = options.limit {
            query.push_str("LIMIT ");
            query.push_str(&limit.to_string());
            query.push('\n');
        }
        if options.offset > 0 {
            query.push_str("OFFSET ");
            query.push_str(&options.offset.to_string());
            query.push('\n');
        }
        query
    }
}

fn prefixes<'a>(namespaces: impl Iterator<Item = (&'a str, &'a str)>) -> String {
    namespaces
        .map(|(prefix, iri)| format!("PREFIX {prefix}: <{iri}>\n"))
        .collect()
}
