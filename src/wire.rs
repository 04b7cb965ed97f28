use serde::Deserialize;

use crate::{ConnectError, Result};

/// Oldest server major version with the transactional HTTP endpoint.
pub const MIN_SUPPORTED_MAJOR: u32 = 2;

/// Discovery document served at the root of the REST API (`/db/data/`).
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ServiceRoot {
    #[serde(default)]
    pub neo4j_version: Option<String>,
    #[serde(default)]
    pub extensions: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub node: Option<String>,
    #[serde(default)]
    pub relationship: Option<String>,
    #[serde(default)]
    pub reference_node: Option<String>,
    #[serde(default)]
    pub node_index: Option<String>,
    #[serde(default)]
    pub relationship_index: Option<String>,
    #[serde(default)]
    pub extensions_info: Option<String>,
    #[serde(default)]
    pub relationship_types: Option<String>,
    #[serde(default)]
    pub batch: Option<String>,
    #[serde(default)]
    pub cypher: Option<String>,
    #[serde(default)]
    pub transaction: Option<String>,
    #[serde(default)]
    pub node_labels: Option<String>,
    #[serde(default)]
    pub indexes: Option<String>,
    #[serde(default)]
    pub constraints: Option<String>,
}

impl ServiceRoot {
    /// Major component of `neo4j_version`, e.g. `3` for `"3.5.0"`.
    pub fn major_version(&self) -> Option<u32> {
        let version = self.neo4j_version.as_deref()?;
        let digits: String = version
            .trim()
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        digits.parse().ok()
    }
}

/// Decodes a probe body and checks that it describes a usable server.
pub(crate) fn decode_service_root(body: &str) -> Result<ServiceRoot> {
    let root = serde_json::from_str::<ServiceRoot>(body).map_err(|err| {
        ConnectError::IncompatibleServer(format!("invalid service root JSON: {err}; body: {body}"))
    })?;

    let version = root.neo4j_version.as_deref().unwrap_or_default();
    if version.trim().is_empty() {
        return Err(ConnectError::IncompatibleServer(
            "service root does not report neo4j_version".to_owned(),
        ));
    }

    match root.major_version() {
        Some(major) if major >= MIN_SUPPORTED_MAJOR => Ok(root),
        Some(_) => Err(ConnectError::IncompatibleServer(format!(
            "server version {version} is older than {MIN_SUPPORTED_MAJOR}.0"
        ))),
        None => Err(ConnectError::IncompatibleServer(format!(
            "unrecognized server version '{version}'"
        ))),
    }
}
