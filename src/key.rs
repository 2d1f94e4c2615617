pub(crate) const SEPARATOR: &str = "::";

/// Checks that a key is one or more identifier segments joined by `::`,
/// e.g. `Mailer`, `app::mail::Mailer` or `app::mail::smtp_v2`.
#[must_use]
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty() && key.split(SEPARATOR).all(is_identifier)
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_ascii_alphabetic() => chars.all(|ch| ch == '_' || ch.is_ascii_alphanumeric()),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::is_valid_key;

    #[test]
    fn test_valid_keys() {
        for key in ["Mailer", "app::Mailer", "app::mail::smtp_v2", "_private::X1"] {
            assert!(is_valid_key(key), "{key}");
        }
    }

    #[test]
    fn test_invalid_keys() {
        for key in ["", "::Mailer", "app::", "app::::Mailer", "1app", "app::mail-er", "app mailer", "app:Mailer", "Vec<u8>"] {
            assert!(!is_valid_key(key), "{key}");
        }
    }
}
