use askql_model::{ExpElement, ExpNamespace};
use indexmap::IndexMap;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// The pattern of an unsatisfiable condition. It references no prefix so it is valid in any
/// query.
pub const FALSE_PATTERN: &str = "<http://www.example.org> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.w3.org/2002/07/owl#nothing> .\n";

static EMPTY_META: LazyLock<ConditionMeta> = LazyLock::new(ConditionMeta::default);

/// The namespace prefixes a condition text depends on, keyed by prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Namespaces(BTreeMap<String, String>);

impl Namespaces {
    pub fn insert(&mut self, namespace: &ExpNamespace) {
        self.0
            .entry(namespace.prefix().to_owned())
            .or_insert_with(|| namespace.iri().to_owned());
    }

    pub fn extend(&mut self, other: &Namespaces) {
        for (prefix, iri) in &other.0 {
            self.0.entry(prefix.clone()).or_insert_with(|| iri.clone());
        }
    }

    pub fn contains(&self, prefix: &str) -> bool {
        self.0.contains_key(prefix)
    }

    /// Iterates over `(prefix, iri)` pairs ordered by prefix.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(prefix, iri)| (prefix.as_str(), iri.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The bookkeeping every satisfiable condition carries next to its text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConditionMeta {
    namespaces: Namespaces,
    weak_conditions: IndexMap<String, String>,
    order_variables: IndexMap<String, String>,
    order_by_variable: Option<String>,
}

impl ConditionMeta {
    pub fn with_namespaces(namespaces: Namespaces) -> Self {
        Self {
            namespaces,
            ..Self::default()
        }
    }

    pub fn namespaces(&self) -> &Namespaces {
        &self.namespaces
    }

    /// Fragments that must be added to the query wherever the condition is used, keyed by the
    /// auxiliary name they bind. They are not part of the condition text.
    pub fn weak_conditions(&self) -> &IndexMap<String, String> {
        &self.weak_conditions
    }

    /// The variables that hold the sort values, keyed by property key (`""` for the result page).
    pub fn order_variables(&self) -> &IndexMap<String, String> {
        &self.order_variables
    }

    /// The variable that orders the results of this condition, if ordering was requested.
    pub fn order_by_variable(&self) -> Option<&str> {
        self.order_by_variable.as_deref()
    }

    pub fn add_namespace(&mut self, namespace: &ExpNamespace) {
        self.namespaces.insert(namespace);
    }

    pub fn extend_namespaces(&mut self, namespaces: &Namespaces) {
        self.namespaces.extend(namespaces);
    }

    /// Adds a weak fragment. An existing fragment under the same name is kept.
    pub fn add_weak_condition(&mut self, name: impl Into<String>, fragment: impl Into<String>) {
        self.weak_conditions
            .entry(name.into())
            .or_insert_with(|| fragment.into());
    }

    pub fn extend_weak_conditions(&mut self, weak_conditions: &IndexMap<String, String>) {
        for (name, fragment) in weak_conditions {
            self.add_weak_condition(name.clone(), fragment.clone());
        }
    }

    /// Removes and returns the weak fragment that was added first.
    pub fn take_first_weak_condition(&mut self) -> Option<(String, String)> {
        self.weak_conditions.shift_remove_index(0)
    }

    /// Records an order variable. An existing variable of the same property is never replaced.
    pub fn add_order_variable(&mut self, property_key: impl Into<String>, variable: impl Into<String>) {
        self.order_variables
            .entry(property_key.into())
            .or_insert_with(|| variable.into());
    }

    pub fn extend_order_variables(&mut self, order_variables: &IndexMap<String, String>) {
        for (key, variable) in order_variables {
            self.add_order_variable(key.clone(), variable.clone());
        }
    }

    pub fn set_order_by_variable(&mut self, variable: impl Into<String>) {
        self.order_by_variable = Some(variable.into());
    }

    /// The concatenated weak fragments.
    pub fn weak_condition_text(&self) -> String {
        self.weak_conditions.values().map(String::as_str).collect()
    }
}

/// The value a singleton condition pins its join variable to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchElement {
    Element(ExpElement),
    /// A variable name including the leading `?`.
    Variable(String),
}

impl MatchElement {
    pub fn turtle_name(&self) -> String {
        match self {
            Self::Element(element) => element.turtle_name(),
            Self::Variable(variable) => variable.clone(),
        }
    }

    pub fn namespace(&self) -> Option<&ExpNamespace> {
        match self {
            Self::Element(element) => element.namespace(),
            Self::Variable(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhereCondition {
    pattern: String,
    safe: bool,
    meta: ConditionMeta,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCondition {
    filter: String,
    meta: ConditionMeta,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingletonCondition {
    match_element: MatchElement,
    pattern: String,
    safe: bool,
    meta: ConditionMeta,
}

impl SingletonCondition {
    pub fn match_element(&self) -> &MatchElement {
        &self.match_element
    }
}

/// A compiled query condition.
///
/// A condition is *safe* if its pattern binds the join variable by itself, so that it can be
/// evaluated without an additional binding of the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// No restriction.
    True(ConditionMeta),
    /// Matches nothing.
    False,
    /// A graph pattern.
    Where(WhereCondition),
    /// A boolean expression over variables bound elsewhere.
    Filter(FilterCondition),
    /// Pins the join variable to a single element, with an optional pattern about that element.
    Singleton(SingletonCondition),
}

impl Condition {
    pub fn new_true() -> Self {
        Self::True(ConditionMeta::default())
    }

    pub fn new_where(pattern: impl Into<String>, safe: bool, namespaces: Namespaces) -> Self {
        Self::Where(WhereCondition {
            pattern: pattern.into(),
            safe,
            meta: ConditionMeta::with_namespaces(namespaces),
        })
    }

    pub fn new_filter(filter: impl Into<String>, namespaces: Namespaces) -> Self {
        Self::Filter(FilterCondition {
            filter: filter.into(),
            meta: ConditionMeta::with_namespaces(namespaces),
        })
    }

    pub fn new_singleton(
        match_element: MatchElement,
        pattern: impl Into<String>,
        safe: bool,
        namespaces: Namespaces,
    ) -> Self {
        Self::Singleton(SingletonCondition {
            match_element,
            pattern: pattern.into(),
            safe,
            meta: ConditionMeta::with_namespaces(namespaces),
        })
    }

    /// The text of the condition in a SPARQL group pattern.
    pub fn pattern(&self) -> String {
        match self {
            Self::True(_) => String::new(),
            Self::False => FALSE_PATTERN.to_owned(),
            Self::Where(condition) => condition.pattern.clone(),
            Self::Filter(condition) => format!("FILTER( {} )\n", condition.filter),
            Self::Singleton(condition) => condition.pattern.clone(),
        }
    }

    /// The filter expression of a filter condition.
    pub fn filter(&self) -> Option<&str> {
        match self {
            Self::Filter(condition) => Some(&condition.filter),
            _ => None,
        }
    }

    /// Replaces the expression of a filter condition. Other conditions are left unchanged.
    pub fn set_filter(&mut self, filter: impl Into<String>) {
        if let Self::Filter(condition) = self {
            condition.filter = filter.into();
        }
    }

    pub fn is_safe(&self) -> bool {
        match self {
            Self::True(_) | Self::Filter(_) => false,
            Self::False => true,
            Self::Where(condition) => condition.safe,
            Self::Singleton(condition) => condition.safe,
        }
    }

    pub fn meta(&self) -> &ConditionMeta {
        match self {
            Self::True(meta) => meta,
            Self::False => &EMPTY_META,
            Self::Where(condition) => &condition.meta,
            Self::Filter(condition) => &condition.meta,
            Self::Singleton(condition) => &condition.meta,
        }
    }

    /// The mutable bookkeeping of the condition. [`Condition::False`] has none.
    pub fn meta_mut(&mut self) -> Option<&mut ConditionMeta> {
        match self {
            Self::True(meta) => Some(meta),
            Self::False => None,
            Self::Where(condition) => Some(&mut condition.meta),
            Self::Filter(condition) => Some(&mut condition.meta),
            Self::Singleton(condition) => Some(&mut condition.meta),
        }
    }

    pub fn namespaces(&self) -> &Namespaces {
        self.meta().namespaces()
    }

    pub fn weak_conditions(&self) -> &IndexMap<String, String> {
        self.meta().weak_conditions()
    }

    pub fn order_variables(&self) -> &IndexMap<String, String> {
        self.meta().order_variables()
    }

    pub fn order_by_variable(&self) -> Option<&str> {
        self.meta().order_by_variable()
    }

    pub fn weak_condition_text(&self) -> String {
        self.meta().weak_condition_text()
    }

    pub fn is_false(&self) -> bool {
        matches!(self, Self::False)
    }
}
