//! # pathmatch Moderation
//!
//! Profanity screening with fuzzy matching, so light obfuscation
//! ("fuckkk", "bullshit!") is still caught.
//!
//! Content is lowercased and split on whitespace. Each token is compared to
//! every blocked word with [`fuzzy::partial_ratio`]; the cutoff depends on
//! the token length (see [`is_fuzzy_match`]).
//!
//! ```rust
//! use pathmatch_moderation::Moderator;
//!
//! let moderator = Moderator::default();
//! assert!(moderator.moderate("what the fuckkk").flagged);
//! assert!(!moderator.moderate("looking for a rust mentor").flagged);
//! ```

pub mod blocklist;
pub mod fuzzy;

pub use blocklist::Blocklist;

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ModerationError>;

/// Longest content accepted for moderation, in chars
pub const MAX_CONTENT_CHARS: usize = 10_000;

/// Tokens longer than this are scanned in overlapping pieces of this length
pub const MAX_TOKEN_CHARS: usize = 48;

#[derive(Error, Debug)]
pub enum ModerationError {
    #[error("Failed to read blocklist {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The token and blocked word that triggered a flag
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Match {
    pub token: String,
    pub word: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModerationVerdict {
    pub flagged: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<Match>,
}

/// Score of `token` against `word` when it clears the length-dependent cutoff.
///
/// Tokens of three chars or fewer never match, up to five chars need a
/// partial ratio above 90, longer tokens above 85.
pub fn fuzzy_match_score(token: &str, word: &str) -> Option<f64> {
    let threshold = match token.chars().count() {
        0..=3 => return None,
        4..=5 => 90.0,
        _ => 85.0,
    };
    let score = fuzzy::partial_ratio(token, word);
    (score > threshold).then_some(score)
}

pub fn is_fuzzy_match(token: &str, word: &str) -> bool {
    fuzzy_match_score(token, word).is_some()
}

#[derive(Debug, Clone)]
pub struct Moderator {
    blocklist: Blocklist,
    /// Overlap between pieces of a long token, so no blocked word is split
    overlap: usize,
}

impl Moderator {
    pub fn new(blocklist: Blocklist) -> Self {
        let longest = blocklist
            .words()
            .iter()
            .map(|w| w.chars().count())
            .max()
            .unwrap_or(0);
        Self {
            blocklist,
            overlap: longest.min(MAX_TOKEN_CHARS / 2),
        }
    }

    pub fn blocklist(&self) -> &Blocklist {
        &self.blocklist
    }

    /// Flag `content` on the first token that fuzzily matches a blocked word
    pub fn moderate(&self, content: &str) -> ModerationVerdict {
        let text = content.to_lowercase();
        let pieces = text
            .split_whitespace()
            .flat_map(|token| token_pieces(token, self.overlap));
        for token in pieces {
            for word in self.blocklist.words() {
                if let Some(score) = fuzzy_match_score(token, word) {
                    tracing::debug!(token, word = %word, score, "Content flagged");
                    return ModerationVerdict {
                        flagged: true,
                        matched: Some(Match {
                            token: token.to_string(),
                            word: word.clone(),
                            score,
                        }),
                    };
                }
            }
        }

        ModerationVerdict {
            flagged: false,
            matched: None,
        }
    }
}

impl Default for Moderator {
    fn default() -> Self {
        Self::new(Blocklist::default())
    }
}

/// `token` itself, or overlapping windows of [`MAX_TOKEN_CHARS`] chars when
/// it is longer, so scoring cost stays linear in the token length
fn token_pieces(token: &str, overlap: usize) -> Vec<&str> {
    let bounds: Vec<usize> = token
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(token.len()))
        .collect();
    let chars = bounds.len() - 1;
    if chars <= MAX_TOKEN_CHARS {
        return vec![token];
    }

    let step = MAX_TOKEN_CHARS - overlap;
    let mut pieces = Vec::with_capacity(chars / step + 1);
    let mut start = 0;
    loop {
        let end = (start + MAX_TOKEN_CHARS).min(chars);
        pieces.push(&token[bounds[start]..bounds[end]]);
        if end == chars {
            break;
        }
        start += step;
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_tokens_never_match() {
        assert!(!is_fuzzy_match("fuk", "fuck"));
        assert!(!is_fuzzy_match("sh!", "shit"));
    }

    #[test]
    fn test_length_thresholds() {
        // 5 chars: needs > 90
        assert!(is_fuzzy_match("shit!", "shit"));
        assert!(!is_fuzzy_match("shirt", "shit"));
        // 6+ chars: needs > 85
        assert!(is_fuzzy_match("fuckin", "fucking"));
    }

    #[test]
    fn test_flags_obfuscated_content() {
        let moderator = Moderator::default();
        let verdict = moderator.moderate("This is BULLSHIT honestly");
        assert!(verdict.flagged);
        let matched = verdict.matched.unwrap();
        assert_eq!(matched.token, "bullshit");
        assert_eq!(matched.word, "shit");
        assert_eq!(matched.score, 100.0);
    }

    #[test]
    fn test_clean_content() {
        let moderator = Moderator::default();
        let verdict = moderator.moderate("Looking for a mentor in distributed systems and data science");
        assert!(!verdict.flagged);
        assert!(verdict.matched.is_none());
    }

    #[test]
    fn test_empty_content() {
        assert!(!Moderator::default().moderate("   ").flagged);
    }

    #[test]
    fn test_custom_blocklist() {
        let moderator = Moderator::new(Blocklist::from_words(["frak"]));
        assert!(moderator.moderate("oh frakking hell").flagged);
        assert!(!moderator.moderate("this is bullshit").flagged);
    }

    #[test]
    fn test_long_token_split_into_overlapping_pieces() {
        let token = "ab".repeat(40);
        let pieces = token_pieces(&token, 8);
        assert_eq!(pieces.len(), 2);
        assert!(pieces.iter().all(|p| p.chars().count() <= MAX_TOKEN_CHARS));
        assert_eq!(pieces[0], &token[..48]);
        assert_eq!(pieces[1], &token[40..80]);
        assert_eq!(token_pieces("short", 8), vec!["short"]);
    }

    #[test]
    fn test_long_token_pieces_respect_char_boundaries() {
        let token = "ß".repeat(60);
        let pieces = token_pieces(&token, 8);
        assert_eq!(pieces.len(), 2);
        assert!(pieces.iter().all(|p| p.chars().all(|c| c == 'ß')));
        assert_eq!(pieces[1].chars().count(), 20);
    }

    #[test]
    fn test_blocked_word_inside_long_token() {
        let moderator = Moderator::default();
        let padding = "ab".repeat(500);
        let hidden = format!("{}bullshit{}", padding, padding);
        assert!(moderator.moderate(&hidden).flagged);
        assert!(!moderator.moderate(&"ab".repeat(2_000)).flagged);
    }

    #[test]
    fn test_verdict_serialization_skips_missing_match() {
        let verdict = ModerationVerdict {
            flagged: false,
            matched: None,
        };
        assert_eq!(serde_json::to_string(&verdict).unwrap(), r#"{"flagged":false}"#);
    }
}
