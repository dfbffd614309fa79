/// Graph API envelope types
use serde::Deserialize;
use serde_json::Value;

/// List response envelope: `{ "data": [...], "paging": {...} }`.
#[derive(Debug, Deserialize)]
pub struct GraphPage {
    /// Records of this page, left as raw JSON for the transformer.
    pub data: Vec<Value>,
    #[serde(default)]
    pub paging: Option<Paging>,
}

impl GraphPage {
    /// Whether upstream advertised a further page.
    pub fn has_next(&self) -> bool {
        self.paging.as_ref().and_then(|p| p.next.as_deref()).is_some_and(|next| !next.is_empty())
    }
}

/// Cursor block of a list response.
#[derive(Debug, Default, Deserialize)]
pub struct Paging {
    #[serde(default)]
    pub next: Option<String>,
}
