// TF-IDF vectorization with smoothed IDF and L2-normalized rows
use ahash::{AHashMap, AHashSet};
use regex::Regex;
use std::sync::OnceLock;

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Tokens of two or more word characters, unicode aware
    PATTERN.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("static token pattern"))
}

/// Sparse row: (term index, weight), sorted by term index
pub type SparseRow = Vec<(usize, f32)>;

#[derive(Debug, Clone, Default)]
pub struct TfidfVectorizer {
    // term -> column index
    vocabulary: AHashMap<String, usize>,
    // column index -> smoothed idf
    idf: Vec<f32>,
}

impl TfidfVectorizer {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenize text the same way for fitting and transforming.
    /// Lowercases first, then keeps every run of 2+ word characters.
    pub fn tokenize(text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        token_pattern()
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Learn vocabulary and IDF from `documents`, then vectorize them
    pub fn fit_transform(&mut self, documents: &[&str]) -> TfidfMatrix {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| Self::tokenize(d)).collect();

        self.vocabulary.clear();
        let mut doc_freq: Vec<u32> = Vec::new();

        for tokens in &tokenized {
            let mut seen: AHashSet<usize> = AHashSet::new();
            for token in tokens {
                let next = self.vocabulary.len();
                let idx = *self.vocabulary.entry(token.clone()).or_insert(next);
                if idx == doc_freq.len() {
                    doc_freq.push(0);
                }
                if seen.insert(idx) {
                    doc_freq[idx] += 1;
                }
            }
        }

        // Smoothed idf: ln((1 + n) / (1 + df)) + 1
        let n = documents.len() as f32;
        self.idf = doc_freq
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f32)).ln() + 1.0)
            .collect();

        let rows = tokenized.iter().map(|tokens| self.weigh(tokens)).collect();
        TfidfMatrix {
            rows,
            vocabulary_len: self.vocabulary.len(),
        }
    }

    /// Vectorize a document against the fitted vocabulary; unknown terms are ignored
    pub fn transform(&self, document: &str) -> SparseRow {
        self.weigh(&Self::tokenize(document))
    }

    fn weigh(&self, tokens: &[String]) -> SparseRow {
        let mut counts: AHashMap<usize, u32> = AHashMap::new();
        for token in tokens {
            if let Some(&idx) = self.vocabulary.get(token) {
                *counts.entry(idx).or_insert(0) += 1;
            }
        }

        let mut row: SparseRow = counts
            .into_iter()
            .map(|(idx, tf)| (idx, tf as f32 * self.idf[idx]))
            .collect();
        row.sort_unstable_by_key(|(idx, _)| *idx);

        let norm = row.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut row {
                *w /= norm;
            }
        }
        row
    }

    #[inline]
    #[must_use]
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }
}

/// Document-term matrix produced by [`TfidfVectorizer::fit_transform`]
#[derive(Debug, Clone)]
pub struct TfidfMatrix {
    rows: Vec<SparseRow>,
    vocabulary_len: usize,
}

impl TfidfMatrix {
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary_len
    }

    pub fn row(&self, i: usize) -> Option<&SparseRow> {
        self.rows.get(i)
    }

    /// Cosine similarity of two rows. Rows are unit length, so this is their dot product.
    pub fn cosine_similarity(&self, i: usize, j: usize) -> f32 {
        match (self.rows.get(i), self.rows.get(j)) {
            (Some(a), Some(b)) => sparse_dot(a, b),
            _ => 0.0,
        }
    }

    /// Similarity of row `i` against every row, in row order
    pub fn similarities_to(&self, i: usize) -> Vec<f32> {
        match self.rows.get(i) {
            Some(query) => self.rows.iter().map(|row| sparse_dot(query, row)).collect(),
            None => vec![0.0; self.rows.len()],
        }
    }
}

/// Merge-join dot product of two index-sorted sparse rows
pub fn sparse_dot(a: &SparseRow, b: &SparseRow) -> f32 {
    let (mut i, mut j) = (0, 0);
    let mut sum = 0.0f32;
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                sum += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    sum
}
