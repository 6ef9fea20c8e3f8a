use yysk_core::AppConfig;

use crate::encode::encode_component;

/// Location and credentials of the remote image service.
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceEndpoint {
    base_url: String,
    access_key: String,
}

impl ServiceEndpoint {
    /// Trailing slashes on `base_url` are dropped.
    #[must_use]
    pub fn new(base_url: &str, access_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            access_key: access_key.to_string(),
        }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.service_base_url, &config.access_key)
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Start a query for `{base_url}/{route}`.
    pub(crate) fn query(&self, route: &str) -> QueryBuilder {
        QueryBuilder {
            url: format!("{}/{route}", self.base_url),
            has_params: false,
        }
    }

    /// The access key as the final `key=` parameter of `query`.
    pub(crate) fn finish(&self, query: QueryBuilder) -> String {
        query.param("key", &self.access_key).build()
    }
}

impl std::fmt::Debug for ServiceEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceEndpoint")
            .field("base_url", &self.base_url)
            .field("access_key", &"[redacted]")
            .finish()
    }
}

/// Appends `name=value` pairs in insertion order.
///
/// Values passed to [`param`](Self::param) are percent-encoded;
/// [`raw_param`](Self::raw_param) is for values that were encoded piecewise,
/// such as the pipe-delimited file list.
pub(crate) struct QueryBuilder {
    url: String,
    has_params: bool,
}

impl QueryBuilder {
    pub(crate) fn param(self, name: &str, value: &str) -> Self {
        let encoded = encode_component(value);
        self.raw_param(name, &encoded)
    }

    pub(crate) fn raw_param(mut self, name: &str, value: &str) -> Self {
        self.url.push(if self.has_params { '&' } else { '?' });
        self.url.push_str(name);
        self.url.push('=');
        self.url.push_str(value);
        self.has_params = true;
        self
    }

    /// Adds the parameter only when `value` is positive.
    pub(crate) fn positive_param<T>(self, name: &str, value: T) -> Self
    where
        T: PartialOrd + Default + std::fmt::Display,
    {
        if value > T::default() {
            let rendered = value.to_string();
            self.raw_param(name, &rendered)
        } else {
            self
        }
    }

    pub(crate) fn build(self) -> String {
        self.url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_dropped() {
        let endpoint = ServiceEndpoint::new("https://api.example.com/", "k");
        assert_eq!(endpoint.base_url(), "https://api.example.com");
    }

    #[test]
    fn key_is_last_parameter() {
        let endpoint = ServiceEndpoint::new("https://api.example.com", "k 1");
        let url = endpoint.finish(endpoint.query("animate").param("name", "pixiv"));
        assert_eq!(url, "https://api.example.com/animate?name=pixiv&key=k%201");
    }

    #[test]
    fn positive_param_skips_zero_and_negative() {
        let url = ServiceEndpoint::new("http://h", "")
            .query("x")
            .positive_param("a", 0u32)
            .positive_param("b", -1.5f64)
            .positive_param("c", 0.6f64)
            .positive_param("d", 12u32)
            .build();
        assert_eq!(url, "http://h/x?c=0.6&d=12");
    }

    #[test]
    fn debug_redacts_access_key() {
        let endpoint = ServiceEndpoint::new("http://h", "webmm-secret");
        assert!(!format!("{endpoint:?}").contains("webmm-secret"));
    }
}
