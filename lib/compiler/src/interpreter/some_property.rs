use crate::condition::Namespaces;
use crate::{CompileContext, Condition, ConditionBuilder};
use askql_model::{DataItem, DataItemKind, ExpNamespace, Property, SomePropertyDescription};

/// A triple from the join variable over the property to the value the inner description
/// constrains. Inverse properties swap subject and object.
pub(crate) fn interpret(
    builder: &mut ConditionBuilder,
    description: &SomePropertyDescription,
    context: &CompileContext,
) -> Condition {
    let property = &description.property;
    let inner_order_by = builder
        .options()
        .is_sort_key(property.key())
        .then(|| property.clone());
    let inner_variable = builder.fresh_variable(None);
    let inner_context =
        CompileContext::new(inner_variable.clone()).with_order_by_property(inner_order_by.clone());
    let inner = builder.compile(&description.inner, &inner_context);
    if inner.is_false() {
        return Condition::False;
    }

    let mut namespaces = inner.namespaces().clone();
    let object = match &inner {
        Condition::Singleton(singleton) => {
            let match_element = singleton.match_element();
            if let Some(namespace) = match_element.namespace() {
                namespaces.insert(namespace);
            }
            match_element.turtle_name()
        }
        _ => format!("?{inner_variable}"),
    };

    let (subject, object, property) = if property.is_inverse() {
        (object, context.join_name(), property.non_inverse())
    } else {
        (context.join_name(), object, property.clone())
    };

    let mut property_name = property_name(builder, &property, &mut namespaces);
    let mut path_closure = None;
    if builder.can_use_property_path_closure()
        && property.is_user_defined()
        && builder.property_has_subproperty(&property)
    {
        let path_variable = builder.fresh_variable(Some("sp"));
        namespaces.insert(&ExpNamespace::rdfs());
        path_closure = Some((
            path_variable.clone(),
            format!("?{path_variable} rdfs:subPropertyOf* {property_name} .\n"),
        ));
        property_name = format!("?{path_variable}");
    }

    let mut pattern = format!("{subject} {property_name} {object} .\n");
    let inner_text = format!("{}{}", inner.pattern(), inner.weak_condition_text());
    if !inner_text.is_empty() {
        if matches!(inner, Condition::Filter(_)) {
            pattern.push_str(&inner_text);
        } else {
            pattern.push_str("{ ");
            pattern.push_str(&inner_text);
            pattern.push_str("}\n");
        }
    }

    let mut condition = Condition::new_where(pattern, true, namespaces);
    if let Some(meta) = condition.meta_mut() {
        meta.extend_order_variables(inner.order_variables());
        if let (Some(order_by), Some(variable)) = (&inner_order_by, inner.order_by_variable()) {
            meta.add_order_variable(order_by.key(), variable);
        }
        if let Some((path_variable, fragment)) = path_closure {
            meta.add_weak_condition(path_variable, fragment);
        }
    }
    builder.add_order_by_data_for_property(&mut condition, context, Some(DataItemKind::Page));
    condition
}

/// The name of the property in the triple: the variable of its redirect target, its helper
/// resource, or its resource.
fn property_name(
    builder: &mut ConditionBuilder,
    property: &Property,
    namespaces: &mut Namespaces,
) -> String {
    let page = DataItem::Page(property.page());
    if let Some(variable) = builder.try_resolve_redirect_variable(&page) {
        return variable;
    }
    let exporter = builder.exporter();
    let resource = exporter
        .helper_resource_for(property)
        .unwrap_or_else(|| exporter.resource_for_property(property));
    if let Some(namespace) = resource.namespace() {
        namespaces.insert(namespace);
    }
    resource.turtle_name()
}
