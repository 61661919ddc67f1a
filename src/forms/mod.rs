use validator::ValidationErrors;

pub mod ingredients;
pub mod recipes;
pub mod tags;

/// Maximum text length expressed in the unit `validator` expects.
pub(crate) const TEXT_MAX_LEN_VALIDATOR: u64 = crate::MAX_TEXT_LENGTH as u64;

/// Name of the first field rejected by validation, in alphabetical order so
/// the reported field does not depend on hash ordering.
pub(crate) fn first_invalid_field(errors: &ValidationErrors) -> String {
    errors
        .errors()
        .keys()
        .map(|field| field.to_string())
        .min()
        .unwrap_or_default()
}

/// Trim the input, collapse whitespace runs into one space and drop control
/// characters.
pub(crate) fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}
