/// Lowercases `text` and collapses every run of non-alphanumeric characters
/// into a single `-`, trimming separators at both ends.
///
/// `"Generic HTTP/S Service"` becomes `"generic-http-s-service"`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;
    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c);
        } else {
            pending_separator = true;
        }
    }
    slug
}
