use crate::{CompileContext, Condition, ConditionBuilder};

/// Matches everything. Only carries the order data of the context.
pub(crate) fn interpret(builder: &mut ConditionBuilder, context: &CompileContext) -> Condition {
    builder.new_true_condition(context)
}
