use std::env;

/// Base URL prepended to owned photo paths so stored records carry absolute
/// URLs (the vision provider fetches them, and clients render them directly).
pub fn public_base_url() -> String {
    env::var("CRISPER_PUBLIC_URL")
        .unwrap_or_else(|_| "http://localhost:3000".to_string())
        .trim_end_matches('/')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url_has_no_trailing_slash() {
        let url = public_base_url();
        assert!(!url.ends_with('/'));
    }
}
