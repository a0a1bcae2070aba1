use crate::{ModerationError, Result};
use ahash::AHashSet;
use std::path::Path;

/// Words always checked with fuzzy matching
pub const FUZZY_BLOCK_LIST: &[&str] = &[
    "fuck", "shit", "bitch", "kutte", "bhosdi", "madarchod", "scheisse",
];

/// Explicit vocabulary bundled with the service
const EXPLICIT_WORDS: &[&str] = &[
    // English
    "fuck", "fucking", "fucker", "fucks",
    "shit", "shitty", "shitter", "shits",
    "asshole", "assholes",
    "cunt", "cunts",
    "bitch", "bitches",
    "cock", "cocks",
    "pussy", "pussies",
    "dick", "dicks",
    "bastard", "bastards",
    "wank", "wanker", "wanking",
    "slut", "sluts",
    "whore", "whores",
    "cumming",
    "blowjob", "blowjobs",
    "tits",
    "nigger", "niggers",
    "faggot", "faggots",
    "dyke", "dykes",
    "motherfucker", "motherfucking",
    // Hindi transliterations
    "lund", "lundh", "lunda",
    "chutiya", "chutiye", "chutiyon",
    "gandu", "gand", "gandi", "ganduo",
    "bosdi", "bhosdi", "bosdike", "bhosdike",
    // Telugu transliterations
    "puku", "pukulo", "pukulona",
    "lanja", "lanjalu", "lanjakoduku",
    "nayi", "kutti",
];

/// Bundled words shorter than this are left out: any token containing them
/// would score a perfect partial match.
const MIN_BUILTIN_LEN: usize = 4;

/// Lowercased, deduplicated list of blocked words in insertion order
#[derive(Debug, Clone)]
pub struct Blocklist {
    words: Vec<String>,
}

impl Blocklist {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = AHashSet::new();
        let mut list = Vec::new();
        for word in words {
            let word = word.as_ref().trim().to_lowercase();
            if word.is_empty() || !seen.insert(word.clone()) {
                continue;
            }
            list.push(word);
        }
        Self { words: list }
    }

    /// Fuzzy block list plus the bundled explicit vocabulary
    pub fn builtin() -> Self {
        let explicit = EXPLICIT_WORDS
            .iter()
            .filter(|w| w.chars().count() >= MIN_BUILTIN_LEN);
        Self::from_words(FUZZY_BLOCK_LIST.iter().chain(explicit))
    }

    /// Fuzzy block list plus one word per line from `path`.
    /// Blank lines and lines starting with `#` are ignored.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ModerationError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let file_words = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'));
        let list = Self::from_words(FUZZY_BLOCK_LIST.iter().copied().chain(file_words));

        tracing::info!(path = %path.display(), words = list.len(), "Loaded moderation blocklist");
        Ok(list)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }
}

impl Default for Blocklist {
    fn default() -> Self {
        Self::builtin()
    }
}
