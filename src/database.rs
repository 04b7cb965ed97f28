use std::fmt;

use reqwest::{Method, Url};

use crate::{ConnectError, ConnectOptions, Result, ServiceRoot, Session};

/// A connected handle to a graph database REST endpoint.
///
/// Only produced by a successful [`crate::connect`]; cloning is cheap and the
/// handle is safe to share between tasks.
#[derive(Clone)]
pub struct Database {
    pub(crate) url: Url,
    pub(crate) session: Session,
    pub(crate) http: reqwest::Client,
    pub(crate) options: ConnectOptions,
    pub(crate) service_root: ServiceRoot,
}

impl fmt::Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Database")
            .field("url", &self.url.as_str())
            .field("version", &self.version())
            .field("session", &self.session)
            .field("options", &self.options)
            .finish()
    }
}

impl Database {
    /// Base URL with a trailing slash and without userinfo.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Server version reported by the service root.
    pub fn version(&self) -> &str {
        self.service_root.neo4j_version.as_deref().unwrap_or_default()
    }

    /// Discovery document fetched during connect.
    pub fn service_root(&self) -> &ServiceRoot {
        &self.service_root
    }

    /// Headers and credentials attached to every request.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Settings in effect; `timeout_ms` also applies to [`Database::request`].
    pub fn options(&self) -> &ConnectOptions {
        &self.options
    }

    /// The client used for every request: the injected one, or a default.
    pub fn http_client(&self) -> &reqwest::Client {
        &self.http
    }

    /// Resolves `path` against the base URL.
    ///
    /// Relative paths keep the base path (`node` → `/db/data/node`); absolute
    /// ones replace it.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.url
            .join(path)
            .map_err(|err| ConnectError::malformed(format!("cannot join '{path}': {err}")))
    }

    /// Starts a request carrying the session headers and credentials.
    pub fn request(&self, method: Method, path: &str) -> Result<reqwest::RequestBuilder> {
        let url = self.endpoint(path)?;
        let request = self
            .http
            .request(method, url)
            .timeout(std::time::Duration::from_millis(self.options.timeout_ms));
        Ok(self.session.authorize(request))
    }
}
