//! Identifier lookup in raw contract text.

use serde::{Deserialize, Serialize};

/// How an identifier is searched for in a contract's raw JSON.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Anywhere in the text. `arm` matches a contract mentioning `armv7hf`.
    #[default]
    Substring,
    /// Only as a complete JSON string literal, `"armv7hf"`.
    Quoted,
}

impl MatchMode {
    /// Whether `text` mentions `ident`.
    pub fn mentions(self, text: &str, ident: &str) -> bool {
        match self {
            MatchMode::Substring => text.contains(ident),
            MatchMode::Quoted => text.contains(&format!("\"{}\"", ident)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTRACT: &str = r#"{"slug": "alpine", "data": {"arch": ["armv7hf", "amd64"]}}"#;

    #[test]
    fn test_substring_is_loose() {
        assert!(MatchMode::Substring.mentions(CONTRACT, "armv7hf"));
        assert!(MatchMode::Substring.mentions(CONTRACT, "arm"));
        assert!(!MatchMode::Substring.mentions(CONTRACT, "aarch64"));
    }

    #[test]
    fn test_quoted_needs_whole_literal() {
        assert!(MatchMode::Quoted.mentions(CONTRACT, "armv7hf"));
        assert!(!MatchMode::Quoted.mentions(CONTRACT, "arm"));
        assert!(MatchMode::Quoted.mentions(CONTRACT, "alpine"));
    }
}
