use crate::condition::{MatchElement, Namespaces};
use crate::{CompileContext, Condition, ConditionBuilder};
use askql_model::{DataItem, Property, ValueDescription};

pub(crate) fn interpret(
    builder: &mut ConditionBuilder,
    description: &ValueDescription,
    context: &CompileContext,
) -> Condition {
    let data_item = &description.data_item;
    match description.comparator.sparql_operator() {
        "" => builder.new_true_condition(context),
        "=" => equality(builder, data_item, description.property.as_ref(), context),
        operator @ ("regex" | "!regex") => regex(builder, data_item, operator, context),
        operator => comparison(builder, data_item, operator, context),
    }
}

fn equality(
    builder: &mut ConditionBuilder,
    data_item: &DataItem,
    property: Option<&Property>,
    context: &CompileContext,
) -> Condition {
    let exporter = builder.exporter();
    let Some(element) = exporter
        .helper_element_for(data_item)
        .or_else(|| exporter.element_for(data_item))
    else {
        return Condition::False;
    };

    let mut condition = match builder.try_resolve_redirect_variable(data_item) {
        // A standalone value matches the redirect variable through a filter.
        Some(variable) if property.is_none() => {
            let mut condition = comparison(builder, data_item, "=", context);
            condition.set_filter(format!("{} = {variable}", context.join_name()));
            condition
        }
        Some(variable) => {
            Condition::new_singleton(MatchElement::Variable(variable), "", false, Namespaces::default())
        }
        None => {
            let mut namespaces = Namespaces::default();
            if let Some(namespace) = element.namespace() {
                namespaces.insert(namespace);
            }
            Condition::new_singleton(MatchElement::Element(element), "", false, namespaces)
        }
    };
    builder.add_order_by_data_for_property(&mut condition, context, Some(data_item.kind()));
    condition
}

fn regex(
    builder: &mut ConditionBuilder,
    data_item: &DataItem,
    operator: &str,
    context: &CompileContext,
) -> Condition {
    let search = match data_item {
        DataItem::Blob(text) => text.clone(),
        DataItem::Page(_) | DataItem::Uri(_) => data_item.sort_key(),
        DataItem::Number(_) | DataItem::Boolean(_) | DataItem::Time(_) => {
            return builder.new_true_condition(context);
        }
    };
    let pattern = like_pattern_to_regex(&search);
    let join_name = context.join_name();

    let mut condition = match data_item {
        DataItem::Blob(_) => Condition::new_filter(
            format!("{operator}( {join_name}, \"{pattern}\", \"s\" )"),
            Namespaces::default(),
        ),
        DataItem::Uri(_) => Condition::new_filter(
            format!("{operator}( str( {join_name} ), \"{pattern}\", \"i\" )"),
            Namespaces::default(),
        ),
        _ => {
            // Pages are matched through their sort key.
            let sort_key = builder
                .exporter()
                .resource_for_property(&Property::new("_SKEY"));
            let filter_variable = builder.fresh_variable(None);
            let mut namespaces = Namespaces::default();
            if let Some(namespace) = sort_key.namespace() {
                namespaces.insert(namespace);
            }
            let match_element = match builder.try_resolve_redirect_variable(data_item) {
                Some(variable) => MatchElement::Variable(variable),
                None => MatchElement::Variable(join_name.clone()),
            };
            let mut condition = Condition::new_singleton(
                match_element,
                format!("{join_name} {} ?{filter_variable} .\n", sort_key.turtle_name()),
                true,
                namespaces,
            );
            if let Some(meta) = condition.meta_mut() {
                meta.add_weak_condition(
                    filter_variable.clone(),
                    format!("FILTER( {operator}( ?{filter_variable}, \"{pattern}\", \"s\" ) )\n"),
                );
            }
            condition
        }
    };
    builder.add_order_by_data_for_property(&mut condition, context, Some(data_item.kind()));
    condition
}

/// A filter `orderVariable <operator> value`. Pages are compared by their sort key, other values
/// by their helper value if they have one.
fn comparison(
    builder: &mut ConditionBuilder,
    data_item: &DataItem,
    operator: &str,
    context: &CompileContext,
) -> Condition {
    let exporter = builder.exporter();
    let element = match data_item {
        DataItem::Page(page) => Some(exporter.sort_key_element(page)),
        _ => exporter
            .helper_element_for(data_item)
            .or_else(|| exporter.element_for(data_item)),
    };
    let Some(element) = element else {
        return Condition::False;
    };

    let mut condition = Condition::new_filter(String::new(), Namespaces::default());
    builder.add_order_by_data(&mut condition, context.join_variable(), data_item.kind());
    let order_variable = condition
        .order_by_variable()
        .unwrap_or(context.join_variable())
        .to_owned();
    if let (Some(namespace), Some(meta)) = (element.namespace(), condition.meta_mut()) {
        meta.add_namespace(namespace);
    }
    condition.set_filter(format!(
        "?{order_variable} {operator} {}",
        element.turtle_name()
    ));
    condition
}

/// Translates a like pattern with `*` and `?` wildcards into an anchored regular expression,
/// escaped for use in a SPARQL string literal.
pub(crate) fn like_pattern_to_regex(pattern: &str) -> String {
    let mut regex = String::with_capacity(pattern.len() + 2);
    regex.push('^');
    for c in pattern.chars() {
        match c {
            '*' => regex.push_str(".*"),
            '?' => regex.push('.'),
            '.' | '+' | '{' | '}' | '(' | ')' | '|' | '^' | '$' | '[' | ']' => {
                regex.push_str("\\\\");
                regex.push(c);
            }
            '\\' => regex.push_str("\\\\\\\\"),
            '"' => regex.push_str("\\\""),
            '\n' => regex.push_str("\\n"),
            '\r' => regex.push_str("\\r"),
            '\t' => regex.push_str("\\t"),
            c => regex.push(c),
        }
    }
    regex.push('$');
    regex
}
