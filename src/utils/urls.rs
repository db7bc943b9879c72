use url::Url;

// The upstream fetches image.url itself; we only reject values it could
// never resolve (relative paths, non-http schemes, unparseable strings).
pub fn is_valid_image_url(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

#[cfg(test)]
mod cfg_tests {
    use crate::utils::urls::is_valid_image_url;

    #[test]
    pub fn test_image_url_validation() {
        assert!(is_valid_image_url("https://example.com/logo.png"));
        assert!(is_valid_image_url("http://localhost:8080/img"));
        assert!(!is_valid_image_url("ftp://example.com/logo.png"));
        assert!(!is_valid_image_url("file:///etc/passwd"));
        assert!(!is_valid_image_url("/relative/path.png"));
        assert!(!is_valid_image_url("not a url"));
        assert!(!is_valid_image_url(""));
    }
}
