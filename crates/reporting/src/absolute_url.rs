//! Build absolute console URLs from relative ones.

use url::Url;

use vizkit_core::config::ServerConfig;

use crate::error::{ReportingError, Result};

/// Console path used when a caller gives none.
pub const DEFAULT_APP_PATH: &str = "/app/kibana";

/// Placeholder origin used only to split relative URLs into components.
const RELATIVE_BASE: &str = "http://relative.invalid/";

/// Components of a URL relative to the console root.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelativeParts {
    pub path: Option<String>,
    pub search: Option<String>,
    pub hash: Option<String>,
}

impl RelativeParts {
    /// Split `relative` into path, query and fragment.
    pub fn parse(relative: &str) -> Result<Self> {
        let parsed = Url::options()
            .base_url(Some(&relative_base()?))
            .parse(relative)
            .map_err(|source| ReportingError::InvalidUrl {
                url: relative.to_string(),
                source,
            })?;

        Ok(Self {
            path: Some(parsed.path().to_string()),
            search: parsed.query().map(str::to_string),
            hash: parsed.fragment().map(str::to_string),
        })
    }
}

fn relative_base() -> Result<Url> {
    Url::parse(RELATIVE_BASE).map_err(|source| ReportingError::InvalidUrl {
        url: RELATIVE_BASE.to_string(),
        source,
    })
}

/// Produces absolute URLs against one console server.
#[derive(Debug, Clone)]
pub struct AbsoluteUrlFactory<'a> {
    server: &'a ServerConfig,
}

impl<'a> AbsoluteUrlFactory<'a> {
    pub fn new(server: &'a ServerConfig) -> Self {
        Self { server }
    }

    /// `protocol://hostname:port` + `base_path + path` + `?search` + `#hash`.
    ///
    /// `base_path` falls back to the server's, `path` to [`DEFAULT_APP_PATH`].
    pub fn absolute_url(&self, base_path: Option<&str>, parts: &RelativeParts) -> Result<String> {
        let origin = self.server.origin();
        let mut url = Url::parse(&origin).map_err(|source| ReportingError::InvalidUrl {
            url: origin.clone(),
            source,
        })?;

        let base_path = base_path.unwrap_or(&self.server.base_path);
        let path = parts.path.as_deref().unwrap_or(DEFAULT_APP_PATH);
        url.set_path(&format!("{}{}", base_path, path));
        url.set_query(parts.search.as_deref());
        url.set_fragment(parts.hash.as_deref());

        Ok(url.to_string())
    }

    /// Resolve a URL relative to the console root under `base_path`.
    pub fn resolve(&self, base_path: Option<&str>, relative: &str) -> Result<String> {
        let parts = RelativeParts::parse(relative)?;
        self.absolute_url(base_path, &parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> ServerConfig {
        ServerConfig {
            protocol: "https".into(),
            hostname: "console.example.com".into(),
            port: 5601,
            base_path: "/abc".into(),
        }
    }

    #[test]
    fn split_relative_url() {
        let parts = RelativeParts::parse("/app/kibana?embed=true#/visualize/edit/1?_g=()").unwrap();
        assert_eq!(parts.path.as_deref(), Some("/app/kibana"));
        assert_eq!(parts.search.as_deref(), Some("embed=true"));
        assert_eq!(parts.hash.as_deref(), Some("/visualize/edit/1?_g=()"));
    }

    #[test]
    fn resolve_against_base_path() {
        let server = server();
        let factory = AbsoluteUrlFactory::new(&server);
        let url = factory.resolve(Some("/s/ops"), "/app/kibana#/dashboard/d1").unwrap();
        assert_eq!(url, "https://console.example.com:5601/s/ops/app/kibana#/dashboard/d1");
    }

    #[test]
    fn defaults_from_server() {
        let server = server();
        let url = AbsoluteUrlFactory::new(&server)
            .absolute_url(None, &RelativeParts::default())
            .unwrap();
        assert_eq!(url, "https://console.example.com:5601/abc/app/kibana");
    }

    #[test]
    fn bad_origin_is_reported() {
        let server = ServerConfig {
            hostname: "bad host".into(),
            ..server()
        };
        let err = AbsoluteUrlFactory::new(&server).resolve(Some(""), "/app").unwrap_err();
        assert!(matches!(err, ReportingError::InvalidUrl { .. }));
    }
}
