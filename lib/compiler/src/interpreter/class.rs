use crate::condition::Namespaces;
use crate::{CompileContext, Condition, ConditionBuilder};
use askql_model::{DataItemKind, ExpNamespace, Property, WikiPage};

/// Membership in any of the categories. One block per category, joined by `UNION`.
pub(crate) fn interpret(
    builder: &mut ConditionBuilder,
    categories: &[WikiPage],
    context: &CompileContext,
) -> Condition {
    if categories.is_empty() {
        return Condition::False;
    }

    let instance_of = builder
        .exporter()
        .resource_for_property(&Property::new("_INST"));
    let mut namespaces = Namespaces::default();
    if let Some(namespace) = instance_of.namespace() {
        namespaces.insert(namespace);
    }

    let mut blocks = Vec::with_capacity(categories.len());
    for category in categories {
        let resource = builder.exporter().resource_for_page(category);
        if let Some(namespace) = resource.namespace() {
            namespaces.insert(namespace);
        }
        let path = if builder.can_use_subcategory_closure()
            && builder.category_has_subcategory(category)
        {
            namespaces.insert(&ExpNamespace::rdfs());
            "/rdfs:subClassOf*"
        } else {
            ""
        };
        blocks.push(format!(
            "{{ {} {}{path} {} . }}\n",
            context.join_name(),
            instance_of.turtle_name(),
            resource.turtle_name()
        ));
    }

    let mut condition = Condition::new_where(blocks.join("UNION\n"), true, namespaces);
    builder.add_order_by_data_for_property(&mut condition, context, Some(DataItemKind::Page));
    condition
}
