//! Models shared across services

use serde::{Deserialize, Serialize};

/// Generic `Name`/`Values` filter accepted by most `Describe*` actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Filter {
    pub name: String,
    pub values: Vec<String>,
}

impl Filter {
    pub fn new(name: impl Into<String>, values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// Resource tag pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TagInfo {
    pub tag_key: String,
    pub tag_value: String,
}

/// Response carrying only the request id.
///
/// For asynchronous CLB actions the request id doubles as the task id.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ActionResponse {
    pub request_id: Option<String>,
}

/// Response whose payload is a boolean `Result` flag.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ResultResponse {
    pub result: Option<bool>,
    pub request_id: Option<String>,
}

impl ResultResponse {
    /// `true` only when the API explicitly reported success.
    pub fn succeeded(&self) -> bool {
        self.result == Some(true)
    }
}
