use serde::{Deserialize, Serialize};

/// Zero-based line/character position inside a code buffer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LinePosition {
    pub line: u32,
    pub character: u32,
}

impl LinePosition {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct LinePositionSpan {
    pub start: LinePosition,
    pub end: LinePosition,
}

impl LinePositionSpan {
    pub fn new(start: LinePosition, end: LinePosition) -> Self {
        Self { start, end }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn positions_use_line_character_pairs() {
        let span = LinePositionSpan::new(LinePosition::new(1, 2), LinePosition::new(3, 4));
        let value = serde_json::to_value(span).unwrap();
        assert_eq!(
            value,
            json!({
                "start": { "line": 1, "character": 2 },
                "end": { "line": 3, "character": 4 },
            })
        );
    }

    #[test]
    fn rejects_negative_line() {
        let err = serde_json::from_value::<LinePosition>(json!({ "line": -1, "character": 0 }));
        assert!(err.is_err());
    }
}
