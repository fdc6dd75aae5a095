use std::fmt::{Display, Formatter};

/// Ids of the wiki namespaces the query language knows by name.
pub mod ns {
    pub const MAIN: i32 = 0;
    pub const USER: i32 = 2;
    pub const FILE: i32 = 6;
    pub const TEMPLATE: i32 = 10;
    pub const HELP: i32 = 12;
    pub const CATEGORY: i32 = 14;
    pub const PROPERTY: i32 = 102;
    pub const CONCEPT: i32 = 108;
}

const NAMESPACE_NAMES: [(i32, &str); 8] = [
    (ns::MAIN, ""),
    (ns::USER, "User"),
    (ns::FILE, "File"),
    (ns::TEMPLATE, "Template"),
    (ns::HELP, "Help"),
    (ns::CATEGORY, "Category"),
    (ns::PROPERTY, "Property"),
    (ns::CONCEPT, "Concept"),
];

/// The canonical name of a namespace, if it is known.
pub fn namespace_name(id: i32) -> Option<&'static str> {
    NAMESPACE_NAMES
        .iter()
        .find(|(ns, _)| *ns == id)
        .map(|(_, name)| *name)
}

/// Resolves a namespace name. The first letter is case-insensitive, `Main` names the main
/// namespace.
pub fn namespace_id(name: &str) -> Option<i32> {
    let name = normalize_title(name);
    if name == "Main" {
        return Some(ns::MAIN);
    }
    NAMESPACE_NAMES
        .iter()
        .find(|(_, known)| *known == name)
        .map(|(id, _)| *id)
}

/// A page of the wiki, identified by its namespace and its database key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WikiPage {
    namespace: i32,
    db_key: String,
    sort_key: Option<String>,
}

impl WikiPage {
    /// Creates a page from a title without a namespace prefix.
    pub fn new(title: &str, namespace: i32) -> Self {
        Self {
            namespace,
            db_key: normalize_title(title),
            sort_key: None,
        }
    }

    /// Creates a page from a title that may carry a namespace prefix (`Help:Contents`).
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        let text = text.strip_prefix(':').unwrap_or(text);
        if let Some((prefix, rest)) = text.split_once(':') {
            if let Some(namespace) = namespace_id(prefix).filter(|id| *id != ns::MAIN) {
                return Self::new(rest, namespace);
            }
        }
        Self::new(text, ns::MAIN)
    }

    pub fn category(name: &str) -> Self {
        Self::new(name, ns::CATEGORY)
    }

    pub fn concept(name: &str) -> Self {
        Self::new(name, ns::CONCEPT)
    }

    #[must_use]
    pub fn with_sort_key(mut self, sort_key: impl Into<String>) -> Self {
        self.sort_key = Some(sort_key.into());
        self
    }

    pub fn namespace(&self) -> i32 {
        self.namespace
    }

    /// The title with underscores, as stored in the database.
    pub fn db_key(&self) -> &str {
        &self.db_key
    }

    /// The title with spaces.
    pub fn title(&self) -> String {
        self.db_key.replace('_', " ")
    }

    /// The key used to order pages and to match them against patterns. Defaults to the title.
    pub fn sort_key(&self) -> String {
        self.sort_key.clone().unwrap_or_else(|| self.title())
    }

    /// The database key prefixed with the namespace name (`Category:Foo_bar`).
    pub fn prefixed_db_key(&self) -> String {
        match namespace_name(self.namespace) {
            Some("") => self.db_key.clone(),
            Some(name) => format!("{name}:{}", self.db_key),
            None => format!("{}:{}", self.namespace, self.db_key),
        }
    }
}

impl Display for WikiPage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.prefixed_db_key().replace('_', " "))
    }
}

/// Applies the title normalization of the wiki: surrounding whitespace removed, runs of spaces and
/// underscores collapsed to one underscore, first letter in upper case.
pub(crate) fn normalize_title(title: &str) -> String {
    let mut normalized = String::with_capacity(title.len());
    for word in title
        .split(|c: char| c == '_' || c.is_whitespace())
        .filter(|w| !w.is_empty())
    {
        if !normalized.is_empty() {
            normalized.push('_');
        }
        normalized.push_str(word);
    }

    let mut chars = normalized.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => normalized,
    }
}
