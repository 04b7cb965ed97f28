//! `neorest` bootstraps an async client for the Neo4j REST API.
//!
//! [`connect`] turns a base URI and a list of options into a ready
//! [`Database`] handle:
//! - options such as [`with_http_client`] are applied first, in order;
//! - the URI gets a trailing `/`, is parsed, and any `user:pass@` userinfo
//!   becomes the session credentials;
//! - the service root is fetched, retrying transient failures with bounded
//!   exponential backoff (see [`ConnectOptions`]).

mod connector;
mod database;
mod error;
pub mod header;
mod options;
pub mod retry;
mod session;
pub mod uri;
mod wire;

pub use connector::{connect, Connector};
pub use database::Database;
pub use error::{ConnectError, FailureCause};
pub use options::{
    with_connect_options, with_credentials, with_header, with_http_client, ConfigOption,
    ConnectOptions,
};
pub use session::{Credentials, Session};
pub use wire::{ServiceRoot, MIN_SUPPORTED_MAJOR};

pub type Result<T> = std::result::Result<T, ConnectError>;
