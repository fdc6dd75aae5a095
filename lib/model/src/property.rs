use crate::page::normalize_title;
use crate::{ns, DataItemKind, WikiPage};
use std::fmt::{Display, Formatter};

/// A property built into the wiki software.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredefinedProperty {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: DataItemKind,
}

/// The built-in properties. Their keys start with an underscore.
pub const PREDEFINED_PROPERTIES: &[PredefinedProperty] = &[
    PredefinedProperty {
        key: "_INST",
        label: "Instance of",
        kind: DataItemKind::Page,
    },
    PredefinedProperty {
        key: "_SUBC",
        label: "Subcategory of",
        kind: DataItemKind::Page,
    },
    PredefinedProperty {
        key: "_SUBP",
        label: "Subproperty of",
        kind: DataItemKind::Page,
    },
    PredefinedProperty {
        key: "_REDI",
        label: "Redirects to",
        kind: DataItemKind::Page,
    },
    PredefinedProperty {
        key: "_SKEY",
        label: "Sort key",
        kind: DataItemKind::Blob,
    },
    PredefinedProperty {
        key: "_MDAT",
        label: "Modification date",
        kind: DataItemKind::Time,
    },
    PredefinedProperty {
        key: "_CONC",
        label: "Concept query",
        kind: DataItemKind::Blob,
    },
    PredefinedProperty {
        key: "_TYPE",
        label: "Has type",
        kind: DataItemKind::Blob,
    },
    PredefinedProperty {
        key: "_URI",
        label: "Equivalent URI",
        kind: DataItemKind::Uri,
    },
    PredefinedProperty {
        key: "_CDAT",
        label: "Creation date",
        kind: DataItemKind::Time,
    },
];

fn predefined_by_key(key: &str) -> Option<&'static PredefinedProperty> {
    PREDEFINED_PROPERTIES.iter().find(|p| p.key == key)
}

fn predefined_by_label(label: &str) -> Option<&'static PredefinedProperty> {
    PREDEFINED_PROPERTIES
        .iter()
        .find(|p| p.label.eq_ignore_ascii_case(label))
}

/// A property, possibly used in inverse direction.
///
/// User-defined properties are keyed by their normalized page title (`Has_population`). Built-in
/// properties are keyed by their reserved id (`_MDAT`) and keep their fixed kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Property {
    key: String,
    inverse: bool,
    kind: DataItemKind,
}

impl Property {
    /// Creates a property from a key or from the label a user would write in a query.
    pub fn new(key_or_label: &str) -> Self {
        let trimmed = key_or_label.trim();
        if let Some(predefined) =
            predefined_by_key(trimmed).or_else(|| predefined_by_label(&trimmed.replace('_', " ")))
        {
            return Self {
                key: predefined.key.to_owned(),
                inverse: false,
                kind: predefined.kind,
            };
        }
        if trimmed.starts_with('_') {
            return Self {
                key: trimmed.to_owned(),
                inverse: false,
                kind: DataItemKind::Page,
            };
        }
        Self {
            key: normalize_title(trimmed),
            inverse: false,
            kind: DataItemKind::Page,
        }
    }

    /// Sets the kind of a user-defined property. Built-in properties keep their fixed kind.
    #[must_use]
    pub fn with_kind(mut self, kind: DataItemKind) -> Self {
        if self.is_user_defined() {
            self.kind = kind;
        }
        self
    }

    #[must_use]
    pub fn with_inverse(mut self, inverse: bool) -> Self {
        self.inverse = inverse;
        self
    }

    /// The same property in forward direction.
    #[must_use]
    pub fn non_inverse(&self) -> Self {
        self.clone().with_inverse(false)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_inverse(&self) -> bool {
        self.inverse
    }

    pub fn is_user_defined(&self) -> bool {
        !self.key.starts_with('_')
    }

    /// The kind of the values this property points to. Inverse properties point to pages.
    pub fn kind(&self) -> DataItemKind {
        if self.inverse {
            DataItemKind::Page
        } else {
            self.kind
        }
    }

    /// The kind of the values of the forward direction.
    pub fn declared_kind(&self) -> DataItemKind {
        self.kind
    }

    /// The human-readable name, as written in queries.
    pub fn label(&self) -> String {
        match predefined_by_key(&self.key) {
            Some(predefined) => predefined.label.to_owned(),
            None => self.key.replace('_', " "),
        }
    }

    /// The page that describes this property.
    pub fn page(&self) -> WikiPage {
        WikiPage::new(&self.label(), ns::PROPERTY)
    }
}

impl Display for Property {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.inverse {
            f.write_str("-")?;
        }
        f.write_str(&self.label())
    }
}
