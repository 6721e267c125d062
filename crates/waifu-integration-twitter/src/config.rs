//! Twitter configuration

/// Default API host
pub const DEFAULT_BASE_URL: &str = "https://api.twitter.com";

/// OAuth 1.0a user-context credentials plus the API host
#[derive(Clone)]
pub struct TwitterConfig {
    /// Consumer (app) key
    pub api_key: String,
    /// Consumer (app) secret
    pub api_secret: String,
    /// User access token
    pub access_token: String,
    /// User access token secret
    pub access_secret: String,
    /// API host, without trailing slash
    pub base_url: String,
}

impl TwitterConfig {
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        access_token: impl Into<String>,
        access_secret: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            access_token: access_token.into(),
            access_secret: access_secret.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Build from optional parts; `None` unless all four are present and non-empty
    pub fn from_parts(
        api_key: Option<String>,
        api_secret: Option<String>,
        access_token: Option<String>,
        access_secret: Option<String>,
    ) -> Option<Self> {
        let present = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        Some(Self::new(
            present(api_key)?,
            present(api_secret)?,
            present(access_token)?,
            present(access_secret)?,
        ))
    }

    /// Point the client at another host
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn tweets_url(&self) -> String {
        format!("{}/2/tweets", self.base_url)
    }
}

// Secrets stay out of logs.
impl std::fmt::Debug for TwitterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwitterConfig")
            .field("api_key", &"***")
            .field("api_secret", &"***")
            .field("access_token", &"***")
            .field("access_secret", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_requires_all_four() {
        let some = |s: &str| Some(s.to_string());
        assert!(TwitterConfig::from_parts(some("k"), some("s"), some("t"), some("ts")).is_some());
        assert!(TwitterConfig::from_parts(None, some("s"), some("t"), some("ts")).is_none());
        assert!(TwitterConfig::from_parts(some("k"), some("s"), some(""), some("ts")).is_none());
        assert!(TwitterConfig::from_parts(some("k"), some("s"), some("t"), None).is_none());
    }

    #[test]
    fn test_base_url_builder() {
        let config = TwitterConfig::new("k", "s", "t", "ts").with_base_url("http://127.0.0.1:9999/");
        assert_eq!(config.tweets_url(), "http://127.0.0.1:9999/2/tweets");
    }

    #[test]
    fn test_debug_hides_credentials() {
        let config = TwitterConfig::new("key-1", "secret-2", "token-3", "tsecret-4");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("key-1"));
        assert!(!debug.contains("secret-2"));
        assert!(!debug.contains("token-3"));
        assert!(!debug.contains("tsecret-4"));
    }
}
