use std::fmt;

use reqwest::header::{HeaderName, HeaderValue};

use crate::{Connector, Credentials};

/// Configures probe timeout and retry behavior.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConnectOptions {
    /// Per-attempt timeout in milliseconds.
    pub timeout_ms: u64,
    /// Total number of probe attempts, including the first one.
    pub max_attempts: usize,
    /// Base retry backoff in milliseconds (exponential strategy).
    pub retry_backoff_ms: u64,
    /// Upper bound for a single backoff delay in milliseconds.
    pub max_backoff_ms: u64,
    /// Optional budget for the whole bootstrap, retries included.
    pub deadline_ms: Option<u64>,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            max_attempts: 3,
            retry_backoff_ms: 200,
            max_backoff_ms: 5_000,
            deadline_ms: None,
        }
    }
}

/// A deferred configuration step applied to a [`Connector`] before the URI
/// is parsed or any request is sent.
///
/// Options run exactly once, in the order given; when two touch the same
/// field the later one wins.
pub struct ConfigOption(Box<dyn FnOnce(&mut Connector) + Send>);

impl ConfigOption {
    /// Wraps an arbitrary closure as an option.
    pub fn new(apply: impl FnOnce(&mut Connector) + Send + 'static) -> Self {
        Self(Box::new(apply))
    }

    pub(crate) fn apply(self, connector: &mut Connector) {
        (self.0)(connector)
    }
}

impl fmt::Debug for ConfigOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ConfigOption(..)")
    }
}

/// Uses `client` for every request, the connectivity probe included.
///
/// Needed for custom transport behavior such as a private certificate
/// authority or a proxy.
pub fn with_http_client(client: reqwest::Client) -> ConfigOption {
    ConfigOption::new(move |connector| {
        connector.set_http_client(client);
    })
}

/// Adds or replaces an outbound header sent with every request.
pub fn with_header(name: HeaderName, value: HeaderValue) -> ConfigOption {
    ConfigOption::new(move |connector| {
        connector.set_header(name, value);
    })
}

/// Sets basic-auth credentials. Userinfo embedded in the URI overrides them.
pub fn with_credentials(username: impl Into<String>, password: impl Into<String>) -> ConfigOption {
    let credentials = Credentials::new(username, Some(password.into()));
    ConfigOption::new(move |connector| {
        connector.set_credentials(credentials);
    })
}

/// Replaces the timeout and retry settings.
pub fn with_connect_options(options: ConnectOptions) -> ConfigOption {
    ConfigOption::new(move |connector| {
        connector.set_options(options);
    })
}
