use std::fmt;

use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, COOKIE, PROXY_AUTHORIZATION,
};

use crate::header;

/// Username/password pair, typically taken from `user:pass@host` userinfo.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: Option<String>,
}

impl Credentials {
    /// Builds credentials; `password` is `None` for `user@host` userinfo.
    pub fn new(username: impl Into<String>, password: Option<String>) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Per-handle request state: outbound headers, credentials and an optional
/// caller-supplied HTTP client.
#[derive(Clone)]
pub struct Session {
    headers: HeaderMap,
    credentials: Option<Credentials>,
    client: Option<reqwest::Client>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            headers: header::default_headers(),
            credentials: None,
            client: None,
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut headers = self.headers.clone();
        for value in headers.values_mut() {
            if value.is_sensitive() {
                *value = HeaderValue::from_static("<redacted>");
            }
        }
        f.debug_struct("Session")
            .field("headers", &headers)
            .field("credentials", &self.credentials)
            .field("custom_client", &self.client.is_some())
            .finish()
    }
}

impl Session {
    /// Headers sent with every request, `User-Agent` included.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Basic-auth credentials from the URI or an option.
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// The injected client, if any option supplied one.
    pub fn client(&self) -> Option<&reqwest::Client> {
        self.client.as_ref()
    }

    pub(crate) fn set_header(&mut self, name: HeaderName, mut value: HeaderValue) {
        if name == AUTHORIZATION || name == PROXY_AUTHORIZATION || name == COOKIE {
            value.set_sensitive(true);
        }
        self.headers.insert(name, value);
    }

    pub(crate) fn set_credentials(&mut self, credentials: Credentials) {
        self.credentials = Some(credentials);
    }

    pub(crate) fn set_client(&mut self, client: reqwest::Client) {
        self.client = Some(client);
    }

    /// Decorates a request with the session headers and basic auth.
    ///
    /// An explicit `Authorization` header takes precedence over credentials.
    pub fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let request = request.headers(self.headers.clone());
        match &self.credentials {
            Some(credentials) if !self.headers.contains_key(AUTHORIZATION) => {
                request.basic_auth(&credentials.username, credentials.password.as_ref())
            }
            _ => request,
        }
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::{HeaderValue, AUTHORIZATION, USER_AGENT};

    use super::{Credentials, Session};

    #[test]
    fn default_session_is_seeded_with_identification_header() {
        let session = Session::default();
        assert!(session.headers().contains_key(USER_AGENT));
        assert!(session.credentials().is_none());
        assert!(session.client().is_none());
    }

    #[test]
    fn debug_redacts_password_and_sensitive_headers() {
        let mut session = Session::default();
        session.set_credentials(Credentials::new("neo4j", Some("hunter2".to_owned())));
        session.set_header(AUTHORIZATION, HeaderValue::from_static("Bearer top-secret"));

        let debug = format!("{session:?}");
        assert!(debug.contains("neo4j"));
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("top-secret"));
    }

    #[test]
    fn authorize_attaches_basic_auth_when_credentials_present() {
        let mut session = Session::default();
        session.set_credentials(Credentials::new("neo4j", Some("secret".to_owned())));
        let client = reqwest::Client::new();

        let request = session
            .authorize(client.get("http://localhost:7474/db/data/"))
            .build()
            .expect("request must build");

        assert!(request.headers().contains_key(AUTHORIZATION));
        assert!(request.headers().contains_key(USER_AGENT));
    }

    #[test]
    fn explicit_authorization_header_wins_over_credentials() {
        let mut session = Session::default();
        session.set_credentials(Credentials::new("neo4j", Some("secret".to_owned())));
        session.set_header(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        let client = reqwest::Client::new();

        let request = session
            .authorize(client.get("http://localhost:7474/db/data/"))
            .build()
            .expect("request must build");

        let values: Vec<_> = request.headers().get_all(AUTHORIZATION).iter().collect();
        assert_eq!(values, vec![&HeaderValue::from_static("Bearer abc")]);
    }

    #[test]
    fn authorize_without_credentials_sends_no_authorization() {
        let session = Session::default();
        let client = reqwest::Client::new();

        let request = session
            .authorize(client.get("http://localhost:7474/db/data/"))
            .build()
            .expect("request must build");

        assert!(!request.headers().contains_key(AUTHORIZATION));
    }
}
