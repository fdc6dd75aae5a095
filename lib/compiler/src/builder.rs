use crate::context::RESULT_VARIABLE;
use crate::guard::{GuardError, RecursionGuard};
use crate::interpreter::{
    class, concept, conjunction, disjunction, namespace, some_property, thing, value,
};
use crate::lookup::{
    ConceptLookupRef, DescriptionParserRef, HierarchyLookupRef, RedirectLookupRef,
};
use crate::{CompileContext, CompilerOptions, Condition};
use askql_model::{
    AskParseError, AskParser, DataItem, DataItemKind, Description, ExpNamespace, Exporter,
    Property, PropertyKindLookupRef, WikiPage,
};
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Compiles [`Description`]s into [`Condition`]s.
///
/// A builder holds the state of one query compile: the variable counter, the recursion guard of
/// concepts, the recorded diagnostics and the variables introduced for redirected pages. Use one
/// builder per query; [`ConditionBuilder::build_condition`] resets that state.
pub struct ConditionBuilder {
    options: CompilerOptions,
    exporter: Exporter,
    parser: DescriptionParserRef,
    redirects: Option<RedirectLookupRef>,
    hierarchy: Option<HierarchyLookupRef>,
    concepts: Option<ConceptLookupRef>,
    property_kinds: Option<PropertyKindLookupRef>,
    variable_counter: usize,
    guard: RecursionGuard,
    errors: Vec<String>,
    /// Redirect targets by their textual name, with the variable that stands for them.
    redirect_variables: IndexMap<String, RedirectVariable>,
}

struct RedirectVariable {
    variable: String,
    namespace: Option<ExpNamespace>,
}

impl ConditionBuilder {
    pub fn new(options: CompilerOptions, exporter: Exporter) -> Self {
        let guard = RecursionGuard::new(options.max_recursion_depth);
        Self {
            options,
            exporter,
            parser: Arc::new(AskParser::default()),
            redirects: None,
            hierarchy: None,
            concepts: None,
            property_kinds: None,
            variable_counter: 0,
            guard,
            errors: Vec::new(),
            redirect_variables: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_redirect_lookup(mut self, redirects: RedirectLookupRef) -> Self {
        self.redirects = Some(redirects);
        self
    }

    #[must_use]
    pub fn with_hierarchy_lookup(mut self, hierarchy: HierarchyLookupRef) -> Self {
        self.hierarchy = Some(hierarchy);
        self
    }

    #[must_use]
    pub fn with_concept_lookup(mut self, concepts: ConceptLookupRef) -> Self {
        self.concepts = Some(concepts);
        self
    }

    /// Sets the parser of concept queries. Defaults to an [`AskParser`] without property kinds.
    #[must_use]
    pub fn with_parser(mut self, parser: DescriptionParserRef) -> Self {
        self.parser = parser;
        self
    }

    /// Sets the kinds used to order by properties that do not occur in the query.
    #[must_use]
    pub fn with_property_kinds(mut self, property_kinds: PropertyKindLookupRef) -> Self {
        self.property_kinds = Some(property_kinds);
        self
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    pub fn exporter(&self) -> &Exporter {
        &self.exporter
    }

    /// The diagnostics recorded since the last [`ConditionBuilder::build_condition`].
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Compiles a top-level description joined on the result variable, adds the conditions for
    /// sort keys the description does not mention and the bindings of redirected pages.
    pub fn build_condition(&mut self, description: &Description) -> Condition {
        self.variable_counter = 0;
        self.guard.clear();
        self.errors.clear();
        self.redirect_variables.clear();

        let mut condition = self.compile(description, &CompileContext::result());
        self.add_missing_order_by_conditions(&mut condition);
        self.add_redirect_conditions(&mut condition);

        debug!(
            query = %description,
            variables = self.variable_counter,
            errors = self.errors.len(),
            "Compiled query description"
        );
        condition
    }

    /// Compiles a description in the given context.
    pub fn compile(&mut self, description: &Description, context: &CompileContext) -> Condition {
        match description {
            Description::Thing => thing::interpret(self, context),
            Description::Class(categories) => class::interpret(self, categories, context),
            Description::Namespace(id) => namespace::interpret(self, *id, context),
            Description::Value(description) => value::interpret(self, description, context),
            Description::SomeProperty(description) => {
                some_property::interpret(self, description, context)
            }
            Description::Conjunction(children) => conjunction::interpret(self, children, context),
            Description::Disjunction(children) => disjunction::interpret(self, children, context),
            Description::Concept(page) => concept::interpret(self, page, context),
        }
    }

    /// Returns a variable name (without `?`) that is unique within the current compile.
    pub fn fresh_variable(&mut self, prefix: Option<&str>) -> String {
        self.variable_counter += 1;
        format!("{}{}", prefix.unwrap_or("v"), self.variable_counter)
    }

    pub fn mark(&mut self, hash: &str) -> Result<(), GuardError> {
        self.guard.mark(hash)
    }

    pub fn unmark(&mut self, hash: &str) {
        self.guard.unmark(hash);
    }

    pub fn record_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("{message}");
        self.errors.push(message);
    }

    pub fn can_use_property_path_closure(&self) -> bool {
        self.options.subproperty_closure && self.hierarchy.is_some()
    }

    /// Whether any sub-property of the property is declared. Without a hierarchy lookup, no
    /// property has one.
    pub fn property_has_subproperty(&self, property: &Property) -> bool {
        let Some(hierarchy) = &self.hierarchy else {
            return false;
        };
        let resource = self.exporter.resource_for_property(property);
        hierarchy.has_subproperty_for(resource.named_node())
    }

    pub fn can_use_subcategory_closure(&self) -> bool {
        self.options.subcategory_closure && self.hierarchy.is_some()
    }

    pub fn category_has_subcategory(&self, category: &WikiPage) -> bool {
        let Some(hierarchy) = &self.hierarchy else {
            return false;
        };
        let resource = self.exporter.resource_for_page(category);
        hierarchy.has_subcategory_for(resource.named_node())
    }

    /// Returns the variable (with `?`) that stands for all pages redirecting to the same target
    /// as the data item, if the data item is a redirected page.
    pub fn try_resolve_redirect_variable(&mut self, data_item: &DataItem) -> Option<String> {
        if !self.options.redirect_resolution {
            return None;
        }
        let DataItem::Page(page) = data_item else {
            return None;
        };
        let redirects = self.redirects.as_ref()?;
        let resource = self.exporter.resource_for_page(page);
        let redirect = redirects.target_of(resource.named_node());
        if !redirect.is_redirect(resource.named_node()) {
            return None;
        }

        let target = self.exporter.resource_for_named_node(redirect.target);
        let target_name = target.turtle_name();
        if let Some(redirect) = self.redirect_variables.get(&target_name) {
            return Some(redirect.variable.clone());
        }
        debug!(page = %page, target = %target_name, existed = redirect.existed, "Resolved redirect");
        let variable = format!("?{}", self.fresh_variable(Some("r")));
        self.redirect_variables.insert(
            target_name,
            RedirectVariable {
                variable: variable.clone(),
                namespace: target.namespace().cloned(),
            },
        );
        Some(variable)
    }

    /// The stored query text of a concept.
    pub fn concept_query_text(&self, concept: &WikiPage) -> Option<String> {
        self.concepts.as_ref()?.concept_query_text(concept)
    }

    pub fn parse_description(&self, query: &str) -> Result<Description, AskParseError> {
        self.parser.parse_description(query)
    }

    /// A true condition with the order data the context asks for.
    pub fn new_true_condition(&self, context: &CompileContext) -> Condition {
        let mut condition = Condition::new_true();
        self.add_order_by_data_for_property(&mut condition, context, None);
        condition
    }

    /// Makes `variable` the order variable of the condition. Pages are ordered by their sort
    /// key, which is bound to `{variable}sk` by a weak fragment.
    pub fn add_order_by_data(&self, condition: &mut Condition, variable: &str, kind: DataItemKind) {
        let Some(meta) = condition.meta_mut() else {
            return;
        };
        if kind == DataItemKind::Page {
            let order_variable = format!("{variable}sk");
            let sort_key = self.exporter.resource_for_property(&Property::new("_SKEY"));
            if let Some(namespace) = sort_key.namespace() {
                meta.add_namespace(namespace);
            }
            meta.add_weak_condition(
                order_variable.clone(),
                format!("?{variable} {} ?{order_variable} .\n", sort_key.turtle_name()),
            );
            meta.set_order_by_variable(order_variable);
        } else {
            meta.set_order_by_variable(variable);
        }
    }

    /// Adds order data if the context orders by a property. Without an explicit kind, the kind
    /// of the property is used.
    pub fn add_order_by_data_for_property(
        &self,
        condition: &mut Condition,
        context: &CompileContext,
        kind: Option<DataItemKind>,
    ) {
        let Some(property) = context.order_by_property() else {
            return;
        };
        let kind = kind.unwrap_or_else(|| property.kind());
        self.add_order_by_data(condition, context.join_variable(), kind);
    }

    fn add_missing_order_by_conditions(&mut self, condition: &mut Condition) {
        if condition.is_false() {
            return;
        }
        let keys = self.options.sort_keys.keys().cloned().collect::<Vec<_>>();
        for key in keys {
            if condition.order_variables().contains_key(&key) {
                continue;
            }
            if key.is_empty() {
                self.add_order_by_data(condition, RESULT_VARIABLE, DataItemKind::Page);
                let order_variable = condition.order_by_variable().map(str::to_owned);
                if let (Some(meta), Some(order_variable)) = (condition.meta_mut(), order_variable) {
                    meta.add_order_variable(key, order_variable);
                }
                continue;
            }

            let property = self.property_for_sort_key(&key);
            let auxiliary = Description::some_property(property, Description::Thing);
            let auxiliary = self.compile(&auxiliary, &CompileContext::result());
            let Some(order_variable) = auxiliary.order_variables().get(&key).cloned() else {
                continue;
            };
            if let Some(meta) = condition.meta_mut() {
                meta.add_weak_condition(
                    order_variable.clone(),
                    format!(
                        "{}OPTIONAL {{ {}}}\n",
                        auxiliary.weak_condition_text(),
                        auxiliary.pattern()
                    ),
                );
                meta.add_order_variable(key, order_variable);
                meta.extend_namespaces(auxiliary.namespaces());
            }
        }
    }

    fn property_for_sort_key(&self, key: &str) -> Property {
        let property = Property::new(key);
        match &self.property_kinds {
            Some(kinds) => {
                let kind = kinds.kind_of(property.key()).unwrap_or_default();
                property.with_kind(kind)
            }
            None => property,
        }
    }

    fn add_redirect_conditions(&self, condition: &mut Condition) {
        if self.redirect_variables.is_empty() {
            return;
        }
        let Some(meta) = condition.meta_mut() else {
            return;
        };
        let redirects = self.exporter.resource_for_property(&Property::new("_REDI"));
        if let Some(namespace) = redirects.namespace() {
            meta.add_namespace(namespace);
        }
        for (target, redirect) in &self.redirect_variables {
            if let Some(namespace) = &redirect.namespace {
                meta.add_namespace(namespace);
            }
            meta.add_weak_condition(
                redirect.variable.trim_start_matches('?'),
                format!(
                    "{} ^{}? {target} .\n",
                    redirect.variable,
                    redirects.turtle_name()
                ),
            );
        }
    }
}
