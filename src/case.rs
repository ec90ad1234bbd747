//! Column names are snake_case; wire field names are their camelCase form.

/// `"customer_id"` -> `"customerId"`. Single-word names pass through unchanged.
pub fn to_camel_case(column: &str) -> String {
    let mut parts = column.split('_').filter(|p| !p.is_empty());
    let mut out = parts.next().unwrap_or_default().to_string();
    for part in parts {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}
