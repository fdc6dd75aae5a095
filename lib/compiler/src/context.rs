use askql_model::Property;

/// The variable of the query results.
pub const RESULT_VARIABLE: &str = "result";

/// The per-call parameters of [`crate::ConditionBuilder::compile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileContext {
    join_variable: String,
    order_by_property: Option<Property>,
}

impl CompileContext {
    /// A context joining on `join_variable` (without the leading `?`).
    pub fn new(join_variable: impl Into<String>) -> Self {
        Self {
            join_variable: join_variable.into(),
            order_by_property: None,
        }
    }

    /// The context of a top-level description.
    pub fn result() -> Self {
        Self::new(RESULT_VARIABLE)
    }

    #[must_use]
    pub fn with_order_by_property(mut self, property: Option<Property>) -> Self {
        self.order_by_property = property;
        self
    }

    pub fn join_variable(&self) -> &str {
        &self.join_variable
    }

    /// The join variable with its leading `?`.
    pub fn join_name(&self) -> String {
        format!("?{}", self.join_variable)
    }

    pub fn order_by_property(&self) -> Option<&Property> {
        self.order_by_property.as_ref()
    }
}
