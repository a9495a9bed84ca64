use serde::{Deserialize, Serialize};
use std::{error::Error, fmt};

/// Why a command failed.
///
/// On the wire this is either a bare message string or a structured
/// `{ "message", "code"? }` object; both decode to this one shape. Encoding
/// writes the bare string whenever there is no classification code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "FailureReasonRepr", into = "FailureReasonRepr")]
pub struct FailureReason {
    pub message: String,
    pub code: Option<String>,
}

impl FailureReason {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: Some(code.into()),
        }
    }

    /// Summarise an error raised while handling a command.
    pub fn from_error(error: &dyn Error, code: Option<String>) -> Self {
        Self {
            message: error.to_string(),
            code,
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{} ({code})", self.message),
            None => f.write_str(&self.message),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum FailureReasonRepr {
    Message(String),
    Structured {
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        code: Option<String>,
    },
}

impl From<FailureReasonRepr> for FailureReason {
    fn from(repr: FailureReasonRepr) -> Self {
        match repr {
            FailureReasonRepr::Message(message) => FailureReason::message(message),
            FailureReasonRepr::Structured { message, code } => FailureReason { message, code },
        }
    }
}

impl From<FailureReason> for FailureReasonRepr {
    fn from(reason: FailureReason) -> Self {
        match reason.code {
            None => FailureReasonRepr::Message(reason.message),
            Some(code) => FailureReasonRepr::Structured {
                message: reason.message,
                code: Some(code),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_and_structured_forms_decode_alike() {
        let bare: FailureReason = serde_json::from_value(json!("Oooops!")).unwrap();
        let structured: FailureReason =
            serde_json::from_value(json!({ "message": "Oooops!" })).unwrap();
        assert_eq!(bare, structured);
        assert_eq!(bare, FailureReason::message("Oooops!"));
    }

    #[test]
    fn encodes_bare_string_without_code() {
        let value = serde_json::to_value(FailureReason::message("Oooops!")).unwrap();
        assert_eq!(value, json!("Oooops!"));

        let value = serde_json::to_value(FailureReason::with_code("Oooops!", "oops")).unwrap();
        assert_eq!(value, json!({ "message": "Oooops!", "code": "oops" }));
    }

    #[test]
    fn summarises_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::InvalidInput, "Oooops!");
        let reason = FailureReason::from_error(&io, Some("oops".into()));
        assert_eq!(reason, FailureReason::with_code("Oooops!", "oops"));
        assert_eq!(reason.to_string(), "Oooops! (oops)");
    }

    #[test]
    fn rejects_other_shapes() {
        assert!(serde_json::from_value::<FailureReason>(json!(42)).is_err());
        assert!(serde_json::from_value::<FailureReason>(json!({ "code": "x" })).is_err());
    }
}
