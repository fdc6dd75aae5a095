use crate::condition::Namespaces;
use crate::{CompileContext, Condition, ConditionBuilder};
use askql_model::DataItemKind;

pub(crate) fn interpret(
    builder: &mut ConditionBuilder,
    namespace: i32,
    context: &CompileContext,
) -> Condition {
    let exporter = builder.exporter();
    let property = exporter.swivt_resource("wikiNamespace");
    let value = exporter.namespace_element(namespace);

    let mut namespaces = Namespaces::default();
    if let Some(namespace) = property.namespace() {
        namespaces.insert(namespace);
    }
    let pattern = format!(
        "{{ {} {} {} . }}\n",
        context.join_name(),
        property.turtle_name(),
        value.turtle_name()
    );

    let mut condition = Condition::new_where(pattern, true, namespaces);
    builder.add_order_by_data_for_property(&mut condition, context, Some(DataItemKind::Page));
    condition
}
