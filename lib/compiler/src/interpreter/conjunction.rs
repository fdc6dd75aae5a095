use crate::condition::{ConditionMeta, MatchElement};
use crate::{CompileContext, Condition, ConditionBuilder};
use askql_model::Description;

/// The accumulated parts of the children of a conjunction.
#[derive(Default)]
struct FoldState {
    pattern: String,
    filters: Vec<String>,
    match_element: Option<MatchElement>,
    safe: bool,
    meta: ConditionMeta,
}

impl FoldState {
    /// Adds a child. Returns `false` if the conjunction can no longer match.
    fn push(&mut self, child: &Condition) -> bool {
        match child {
            Condition::False => return false,
            Condition::True(_) => {}
            Condition::Where(_) => self.pattern.push_str(&child.pattern()),
            Condition::Filter(_) => self.filters.extend(child.filter().map(str::to_owned)),
            Condition::Singleton(singleton) => {
                let match_element = singleton.match_element();
                match &self.match_element {
                    Some(existing) if existing.turtle_name() != match_element.turtle_name() => {
                        return false;
                    }
                    Some(_) => {}
                    None => self.match_element = Some(match_element.clone()),
                }
                self.pattern.push_str(&child.pattern());
            }
        }
        self.safe |= child.is_safe();
        self.meta.extend_namespaces(child.namespaces());
        self.meta.extend_weak_conditions(child.weak_conditions());
        self.meta.extend_order_variables(child.order_variables());
        true
    }

    fn into_condition(self) -> Condition {
        let Self {
            mut pattern,
            filters,
            match_element,
            safe,
            meta,
        } = self;
        let mut namespaces = meta.namespaces().clone();
        let filter = filters.join(" && ");
        let has_pattern = !pattern.is_empty();
        if !filter.is_empty() && (has_pattern || match_element.is_some()) {
            pattern.push_str("FILTER( ");
            pattern.push_str(&filter);
            pattern.push_str(" )\n");
        }

        let mut condition = match match_element {
            Some(match_element) => {
                if let Some(namespace) = match_element.namespace() {
                    namespaces.insert(namespace);
                }
                Condition::new_singleton(match_element, pattern, safe, namespaces)
            }
            None if has_pattern => Condition::new_where(pattern, safe, namespaces),
            None if filter.is_empty() => Condition::new_true(),
            None => Condition::new_filter(filter, namespaces),
        };
        if let Some(condition_meta) = condition.meta_mut() {
            condition_meta.extend_weak_conditions(meta.weak_conditions());
            condition_meta.extend_order_variables(meta.order_variables());
        }
        condition
    }
}

/// All children must match the join variable. Patterns are concatenated, filters are joined
/// with `&&` and singletons must agree on their element.
pub(crate) fn interpret(
    builder: &mut ConditionBuilder,
    children: &[Description],
    context: &CompileContext,
) -> Condition {
    match children {
        [] => return builder.new_true_condition(context),
        [child] => return builder.compile(child, context),
        _ => {}
    }

    let child_context = CompileContext::new(context.join_variable());
    let mut state = FoldState::default();
    for child in children {
        let child = builder.compile(child, &child_context);
        if !state.push(&child) {
            return Condition::False;
        }
    }

    let mut condition = state.into_condition();
    builder.add_order_by_data_for_property(&mut condition, context, None);
    condition
}
