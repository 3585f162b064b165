/// Render the final prompt for one item.
///
/// Only the first literal `{item}` is substituted; later occurrences are
/// left untouched. A template without the token is prepended to the
/// content, and an empty template sends the content alone. This is a
/// single fixed-point substitution, not a template engine.
pub fn render(template: &str, content: &str) -> String {
    if template.is_empty() {
        content.to_string()
    } else if template.contains("{item}") {
        template.replacen("{item}", content, 1)
    } else {
        format!("{template}\n{content}")
    }
}
