use serde::{Deserialize, Serialize};

/// A rendered representation of a value: content plus the MIME type it is
/// rendered as. Sequences of these are ordered by representation priority.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct FormattedValue {
    pub mime_type: String,
    pub value: String,
}

impl FormattedValue {
    pub const TEXT_PLAIN: &'static str = "text/plain";
    pub const TEXT_HTML: &'static str = "text/html";
    pub const TEXT_MARKDOWN: &'static str = "text/markdown";

    pub fn new(mime_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            value: value.into(),
        }
    }

    pub fn plain(value: impl Into<String>) -> Self {
        Self::new(Self::TEXT_PLAIN, value)
    }
}
