//! Text embedders
//!
//! Turns feature strings into dense vectors for the flat index.
//!
//! - [`HashEmbedder`] - feature hashing with fixed seeds, no model download
//! - `FastEmbedder` - pretrained `all-MiniLM-L6-v2` sentence encoder through
//!   `fastembed` (ONNX runtime), behind the `fastembed` cargo feature

use crate::{Error, Result, Vector};
use ahash::RandomState;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

/// Fixed seeds so the same text always hashes to the same buckets
const BUCKET_HASHER: RandomState = RandomState::with_seeds(
    0x243f_6a88_85a3_08d3,
    0x1319_8a2e_0370_7344,
    0xa409_3822_299f_31d0,
    0x082e_fa98_ec4e_6c89,
);

/// Output dimension of `all-MiniLM-L6-v2`
pub const MINILM_DIM: usize = 384;

pub trait Embedder: Send + Sync {
    /// Embed a batch of texts, one vector per text in input order
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vector>>;

    fn embed_one(&self, text: &str) -> Result<Vector> {
        self.embed(&[text])?
            .pop()
            .ok_or_else(|| Error::Embedding("embedder returned no vector".to_string()))
    }

    fn dimension(&self) -> usize;

    fn model_name(&self) -> &str;
}

/// Feature-hashing embedder.
///
/// Character trigrams and whole words are hashed into a fixed number of
/// buckets; words weigh twice as much as trigrams. The vector is L2-normalized
/// so similar strings land close together under both cosine and L2.
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dim: usize,
}

impl HashEmbedder {
    pub fn new(dim: usize) -> Result<Self> {
        if dim == 0 {
            return Err(Error::InvalidConfig(
                "embedding dimension must be positive".to_string(),
            ));
        }
        Ok(Self { dim })
    }

    fn bucket(&self, token: &str) -> usize {
        (BUCKET_HASHER.hash_one(token) as usize) % self.dim
    }

    fn embed_text(&self, text: &str) -> Vector {
        let mut components = vec![0.0f32; self.dim];
        let normalized = text.to_lowercase();

        for trigram in trigrams(&normalized) {
            components[self.bucket(&trigram)] += 1.0;
        }

        for word in normalized.split_whitespace() {
            components[self.bucket(word)] += 2.0;
        }

        let mut vector = Vector::new(components);
        vector.normalize();
        vector
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self { dim: MINILM_DIM }
    }
}

impl Embedder for HashEmbedder {
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vector>> {
        Ok(texts.iter().map(|t| self.embed_text(t)).collect())
    }

    fn dimension(&self) -> usize {
        self.dim
    }

    fn model_name(&self) -> &str {
        "hash-trigram"
    }
}

/// Character trigrams of `s` padded with two spaces on each side
fn trigrams(s: &str) -> Vec<String> {
    let padded = format!("  {}  ", s);
    let chars: Vec<char> = padded.chars().collect();
    chars.windows(3).map(|w| w.iter().collect()).collect()
}

#[cfg(feature = "fastembed")]
pub use self::fast::FastEmbedder;

#[cfg(feature = "fastembed")]
mod fast {
    use super::{Embedder, MINILM_DIM};
    use crate::{Error, Result, Vector};
    use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
    use parking_lot::Mutex;
    use std::path::Path;

    /// Pretrained `all-MiniLM-L6-v2` sentence encoder
    pub struct FastEmbedder {
        model: Mutex<TextEmbedding>,
    }

    impl FastEmbedder {
        /// Load the model, downloading it into `cache_dir` on first use
        pub fn new(cache_dir: Option<&Path>) -> Result<Self> {
            let mut options =
                InitOptions::new(EmbeddingModel::AllMiniLML6V2).with_show_download_progress(false);
            if let Some(dir) = cache_dir {
                options = options.with_cache_dir(dir.to_path_buf());
            }

            let model = TextEmbedding::try_new(options)
                .map_err(|e| Error::Embedding(format!("failed to load model: {}", e)))?;
            tracing::info!("Loaded sentence embedding model all-MiniLM-L6-v2");

            Ok(Self {
                model: Mutex::new(model),
            })
        }
    }

    impl Embedder for FastEmbedder {
        fn embed(&self, texts: &[&str]) -> Result<Vec<Vector>> {
            if texts.is_empty() {
                return Ok(Vec::new());
            }
            let embeddings = self
                .model
                .lock()
                .embed(texts.to_vec(), None)
                .map_err(|e| Error::Embedding(e.to_string()))?;
            Ok(embeddings.into_iter().map(Vector::new).collect())
        }

        fn dimension(&self) -> usize {
            MINILM_DIM
        }

        fn model_name(&self) -> &str {
            "all-MiniLM-L6-v2"
        }
    }
}

/// Which embedder the service runs with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmbedderKind {
    #[default]
    Hash,
    FastEmbed,
}

impl FromStr for EmbedderKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "hash" => Ok(EmbedderKind::Hash),
            "fastembed" | "minilm" => Ok(EmbedderKind::FastEmbed),
            other => Err(Error::InvalidConfig(format!("unknown embedder: {}", other))),
        }
    }
}

impl fmt::Display for EmbedderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmbedderKind::Hash => write!(f, "hash"),
            EmbedderKind::FastEmbed => write!(f, "fastembed"),
        }
    }
}

/// Construct the configured embedder
pub fn build_embedder(kind: EmbedderKind, cache_dir: Option<&Path>) -> Result<Arc<dyn Embedder>> {
    match kind {
        EmbedderKind::Hash => Ok(Arc::new(HashEmbedder::default())),
        #[cfg(feature = "fastembed")]
        EmbedderKind::FastEmbed => Ok(Arc::new(FastEmbedder::new(cache_dir)?)),
        #[cfg(not(feature = "fastembed"))]
        EmbedderKind::FastEmbed => {
            let _ = cache_dir;
            Err(Error::InvalidConfig(
                "fastembed embedder requested but the `fastembed` feature is not enabled"
                    .to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_embedder_dimension_and_norm() {
        let embedder = HashEmbedder::default();
        let vector = embedder.embed_one("Rust backend engineer").unwrap();
        assert_eq!(vector.dim(), MINILM_DIM);
        assert!((vector.norm() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_hash_embedder_is_deterministic() {
        let embedder = HashEmbedder::new(64).unwrap();
        let a = embedder.embed_one("data science").unwrap();
        let b = embedder.embed_one("Data Science").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_buckets_shared_across_instances() {
        let a = HashEmbedder::default();
        let b = HashEmbedder::new(MINILM_DIM).unwrap();
        for token in ["rust", "  r", "kubernetes", "é"] {
            assert_eq!(a.bucket(token), b.bucket(token));
            assert_eq!(a.bucket(token), BUCKET_HASHER.hash_one(token) as usize % MINILM_DIM);
        }
    }

    #[test]
    fn test_similar_texts_are_closer() {
        let embedder = HashEmbedder::default();
        let vectors = embedder
            .embed(&[
                "python machine learning data science",
                "python machine learning engineer",
                "oil painting watercolor art",
            ])
            .unwrap();
        let near = vectors[0].squared_l2_distance(&vectors[1]);
        let far = vectors[0].squared_l2_distance(&vectors[2]);
        assert!(near < far, "expected {} < {}", near, far);
    }

    #[test]
    fn test_batch_order_preserved() {
        let embedder = HashEmbedder::new(32).unwrap();
        let batch = embedder.embed(&["alpha", "beta"]).unwrap();
        assert_eq!(batch[1], embedder.embed_one("beta").unwrap());
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(matches!(HashEmbedder::new(0), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_embedder_kind_parsing() {
        assert_eq!("hash".parse::<EmbedderKind>().unwrap(), EmbedderKind::Hash);
        assert_eq!("FastEmbed".parse::<EmbedderKind>().unwrap(), EmbedderKind::FastEmbed);
        assert!("word2vec".parse::<EmbedderKind>().is_err());
        assert_eq!(EmbedderKind::FastEmbed.to_string(), "fastembed");
    }

    #[test]
    fn test_build_hash_embedder() {
        let embedder = build_embedder(EmbedderKind::Hash, None).unwrap();
        assert_eq!(embedder.model_name(), "hash-trigram");
        assert_eq!(embedder.dimension(), MINILM_DIM);
    }

    #[cfg(not(feature = "fastembed"))]
    #[test]
    fn test_fastembed_requires_feature() {
        assert!(build_embedder(EmbedderKind::FastEmbed, None).is_err());
    }
}
