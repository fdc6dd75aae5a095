use crate::condition::{ConditionMeta, Namespaces};
use crate::variables::replace_variable;
use crate::{CompileContext, Condition, ConditionBuilder};
use askql_model::Description;

/// The accumulated parts of the children of a disjunction.
#[derive(Default)]
struct FoldState {
    union_blocks: Vec<String>,
    filters: Vec<String>,
    safe: bool,
    meta: ConditionMeta,
}

impl FoldState {
    fn push(&mut self, child: &Condition, join_name: &str) {
        match child {
            Condition::True(_) | Condition::False => return,
            Condition::Where(_) => {
                self.union_blocks.push(format!("{{\n{}}}\n", child.pattern()));
            }
            Condition::Filter(_) => self.filters.extend(child.filter().map(str::to_owned)),
            Condition::Singleton(singleton) => {
                let match_element = singleton.match_element();
                if let Some(namespace) = match_element.namespace() {
                    self.meta.add_namespace(namespace);
                }
                let equality = format!("{join_name} = {}", match_element.turtle_name());
                let pattern = child.pattern();
                if pattern.is_empty() {
                    self.filters.push(equality);
                } else {
                    // Only the first weak fragment of the branch replaces the equality filter.
                    // The others still constrain the disjunction as a whole.
                    let mut meta = child.meta().clone();
                    let filter = match meta.take_first_weak_condition() {
                        Some((_, fragment)) => fragment,
                        None => format!("FILTER( {equality} )\n"),
                    };
                    self.union_blocks.push(format!("{{\n{pattern}{filter}}}\n"));
                    self.safe |= child.is_safe();
                    self.meta.extend_namespaces(meta.namespaces());
                    self.meta.extend_weak_conditions(meta.weak_conditions());
                    return;
                }
            }
        }
        self.safe |= child.is_safe();
        self.meta.extend_namespaces(child.namespaces());
        self.meta.extend_weak_conditions(child.weak_conditions());
    }
}

/// Any child may match the join variable. Graph patterns become `UNION` blocks, filters are
/// joined with `||`.
pub(crate) fn interpret(
    builder: &mut ConditionBuilder,
    children: &[Description],
    context: &CompileContext,
) -> Condition {
    match children {
        [] => return Condition::False,
        [child] => return builder.compile(child, context),
        _ => {}
    }

    let join_name = context.join_name();
    let child_context = CompileContext::new(context.join_variable());
    let mut state = FoldState::default();
    for child in children {
        let child = builder.compile(child, &child_context);
        if matches!(child, Condition::True(_)) {
            // Order data of the siblings and of the outer context is discarded.
            return Condition::new_true();
        }
        state.push(&child, &join_name);
    }

    let FoldState {
        union_blocks,
        filters,
        safe,
        meta,
    } = state;
    let union = union_blocks.join("UNION\n");
    let filter = filters.join(" || ");
    let namespaces: Namespaces = meta.namespaces().clone();

    let mut condition = match (union.is_empty(), filter.is_empty()) {
        (true, true) => return Condition::False,
        (false, true) => Condition::new_where(union, safe, namespaces),
        (true, false) => Condition::new_filter(filter, namespaces),
        (false, false) => {
            // The union binds its own variable so that the filter alternatives still see every
            // value of the join variable.
            let auxiliary = builder.fresh_variable(None);
            let union = replace_variable(&union, context.join_variable(), &format!("?{auxiliary}"));
            let filter = format!("{filter} || {join_name} = ?{auxiliary}");
            Condition::new_where(
                format!("OPTIONAL {{ {union}}}\n FILTER( {filter} )\n"),
                false,
                namespaces,
            )
        }
    };
    if let Some(condition_meta) = condition.meta_mut() {
        condition_meta.extend_weak_conditions(meta.weak_conditions());
    }
    builder.add_order_by_data_for_property(&mut condition, context, None);
    condition
}
