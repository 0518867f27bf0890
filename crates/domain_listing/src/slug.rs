//! URL slugs for listings, states, cities, and styles

/// Lower-cases the input and joins runs of ASCII alphanumerics with `-`
///
/// `"St. Louis"` becomes `"st-louis"`, `"Neo-Traditional "` becomes
/// `"neo-traditional"`. Characters outside ASCII alphanumerics act as
/// separators.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}
