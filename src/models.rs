use serde::{Deserialize, Serialize};

/// Result of looking up a title on a page.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TitleLookup {
    pub success: bool,
    pub title: String,
    pub raw_title: String,
}

/// One normalized title as printed by `retitle --json`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TitleRecord {
    pub raw_title: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_url: Option<String>,
}
