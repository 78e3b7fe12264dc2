//! Label conversions used when deriving symbol names from cluster-library labels.

/// Convert a cluster-library label to `UPPER_SNAKE` macro case.
///
/// Labels come in every shape: `application version`, `ZCLVersion`,
/// `stackVersion`, `on/off`. A capital followed by a lowercase letter starts
/// a new word; runs of capitals stay together; spaces and `:/-.` become
/// underscores; `+()&` are dropped.
///
/// # Examples
/// ```
/// use zapc_core::utils::to_macro_case;
/// assert_eq!(to_macro_case("application version"), "APPLICATION_VERSION");
/// assert_eq!(to_macro_case("ZCLVersion"), "ZCL_VERSION");
/// ```
pub fn to_macro_case(label: &str) -> String {
    let chars: Vec<char> = label
        .chars()
        .filter(|c| !matches!(c, '+' | '(' | ')' | '&'))
        .collect();

    // Split before every capital that starts a lowercase run.
    let mut split = String::with_capacity(chars.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        let starts_word = c.is_ascii_uppercase()
            && chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
        if starts_word {
            if split.ends_with('.') {
                split.pop();
            }
            split.push('_');
        }
        split.push(c);
    }

    let mut out = String::with_capacity(split.len() + 4);
    let mut was_upper = false;
    for (i, c) in split.chars().enumerate() {
        if c == '_' {
            out.push('_');
            was_upper = true;
        } else if c.is_ascii_digit() {
            out.push(c);
            was_upper = false;
        } else if c.is_ascii_lowercase() {
            out.push(c.to_ascii_uppercase());
            was_upper = false;
        } else {
            if i != 0 && !was_upper {
                out.push('_');
            }
            out.push(c);
            was_upper = true;
        }
    }

    clean_macro(&out)
}

/// Convert a cluster-library label to `snake_case`.
///
/// # Examples
/// ```
/// use zapc_core::utils::to_snake_case;
/// assert_eq!(to_snake_case("stackVersion"), "stack_version");
/// assert_eq!(to_snake_case("application version"), "application_version");
/// ```
pub fn to_snake_case(label: &str) -> String {
    to_macro_case(label).to_ascii_lowercase()
}

fn clean_macro(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        let c = match c {
            ' ' | ':' | '/' | '-' | '.' => '_',
            other => other,
        };
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }
    out.trim_matches('_').to_string()
}
