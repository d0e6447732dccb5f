use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

/// Copy of `headers` that is safe to log.
pub fn sanitize_headers(headers: &HeaderMap) -> HeaderMap {
    headers
        .iter()
        .map(|(name, value)| {
            let value = if *name == AUTHORIZATION {
                HeaderValue::from_static("[REDACTED]")
            } else {
                value.clone()
            };
            (name.clone(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use reqwest::header::CONTENT_TYPE;

    use super::*;

    #[test]
    fn test_authorization_is_redacted() {
        let mut fixture = HeaderMap::new();
        fixture.insert(AUTHORIZATION, HeaderValue::from_static("Bearer sk-123"));
        fixture.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let actual = sanitize_headers(&fixture);

        assert_eq!(actual[AUTHORIZATION], "[REDACTED]");
        assert_eq!(actual[CONTENT_TYPE], "application/json");
    }
}
