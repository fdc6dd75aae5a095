use crate::{CompileContext, Condition, ConditionBuilder, GuardError};
use askql_model::WikiPage;
use md5::{Digest, Md5};

/// Expands a concept into the description of its stored query.
///
/// Concepts may refer to other concepts. A concept that is already being expanded further up
/// yields [`Condition::False`] and a recorded error.
pub(crate) fn interpret(
    builder: &mut ConditionBuilder,
    concept: &WikiPage,
    context: &CompileContext,
) -> Condition {
    let Some(query) = builder.concept_query_text(concept) else {
        return Condition::False;
    };
    let description = match builder.parse_description(&query) {
        Ok(description) => description,
        Err(error) => {
            builder.record_error(format!("invalid query of concept {concept}: {error}"));
            return Condition::False;
        }
    };

    let hash = format!(
        "concept-{}",
        hex::encode(Md5::new().chain_update(description.to_string()).finalize())
    );
    if let Err(error) = builder.mark(&hash) {
        let message = match error {
            GuardError::AlreadyMarked(_) => {
                format!("circular concept reference in query \"{query}\"")
            }
            GuardError::DepthExceeded(_) => format!("{error} in query \"{query}\""),
        };
        builder.record_error(message);
        return Condition::False;
    }
    let condition = builder.compile(&description, context);
    builder.unmark(&hash);
    condition
}
