//! Output naming for exported images.

/// `{title}_hiring_post.png`, whitespace runs replaced by `_`.
pub fn hiring_post_file_name(title: &str) -> String {
    format!("{}_hiring_post.png", underscore_whitespace(title))
}

/// `{name}_welcome_post.png`, whitespace runs replaced by `_`.
pub fn welcome_post_file_name(name: &str) -> String {
    format!("{}_welcome_post.png", underscore_whitespace(name))
}

fn underscore_whitespace(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_space = false;
    for ch in value.chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push('_');
            }
            in_space = true;
        } else {
            out.push(ch);
            in_space = false;
        }
    }
    out
}
