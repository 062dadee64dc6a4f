use axum::http::HeaderMap;

use backend_domain::RuntimeConfig;

/// Flat bearer-token gate. With no token configured the API is open.
pub fn authorize(config: &RuntimeConfig, headers: &HeaderMap) -> bool {
    if let Some(api_token) = &config.api_token {
        return extract_bearer(headers)
            .map(|v| v == *api_token)
            .unwrap_or(false);
    }
    true
}

fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("Authorization")?.to_str().ok()?.trim();
    let prefix = "Bearer ";
    if !value.starts_with(prefix) {
        return None;
    }
    let token = value[prefix.len()..].trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_token(token: Option<&str>) -> RuntimeConfig {
        RuntimeConfig {
            api_token: token.map(ToString::to_string),
            ..RuntimeConfig::default()
        }
    }

    #[test]
    fn open_when_no_token_configured() {
        assert!(authorize(&config_with_token(None), &HeaderMap::new()));
    }

    #[test]
    fn matching_bearer_token_passes() {
        let mut headers = HeaderMap::new();
        headers.insert("Authorization", "Bearer sesame".parse().unwrap());
        assert!(authorize(&config_with_token(Some("sesame")), &headers));
    }

    #[test]
    fn missing_or_wrong_token_fails() {
        let config = config_with_token(Some("sesame"));
        assert!(!authorize(&config, &HeaderMap::new()));

        let mut headers = HeaderMap::new();
        headers.insert("Authorization", "Bearer wrong".parse().unwrap());
        assert!(!authorize(&config, &headers));

        let mut headers = HeaderMap::new();
        headers.insert("Authorization", "Basic sesame".parse().unwrap());
        assert!(!authorize(&config, &headers));
    }
}
