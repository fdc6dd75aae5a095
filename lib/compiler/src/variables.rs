/// Replaces every occurrence of the variable `?{variable}` in `text` by `replacement`.
///
/// Only whole variable names are replaced: `?x` does not touch `?x1` or `?xsk`.
pub fn replace_variable(text: &str, variable: &str, replacement: &str) -> String {
    let token = format!("?{variable}");
    let mut result = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(position) = rest.find(&token) {
        let end = position + token.len();
        let continues = rest[end..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_');
        result.push_str(&rest[..position]);
        result.push_str(if continues { &token } else { replacement });
        rest = &rest[end..];
    }
    result.push_str(rest);
    result
}
