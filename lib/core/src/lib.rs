//! # pathmatch Core
//!
//! Core library for the pathmatch recommendation service.
//!
//! This crate provides the numeric building blocks the recommenders sit on:
//!
//! - [`Vector`] - Dense vector with cosine and L2 distances
//! - [`TfidfVectorizer`] - TF-IDF document vectors with smoothed IDF
//! - [`FlatIndex`] - Exact nearest-neighbour search by squared L2 distance
//! - [`Embedder`] - Text to vector encoders ([`HashEmbedder`], and the
//!   pretrained `FastEmbedder` with the `fastembed` feature)
//!
//! ## Example
//!
//! ```rust
//! use pathmatch_core::{Embedder, FlatIndex, HashEmbedder};
//!
//! let embedder = HashEmbedder::default();
//! let vectors = embedder.embed(&["rust backend", "oil painting"]).unwrap();
//! let index = FlatIndex::from_vectors(&vectors).unwrap();
//!
//! let query = embedder.embed_one("rust backend developer").unwrap();
//! let hits = index.search(&query, 1).unwrap();
//! assert_eq!(hits[0].position, 0);
//! ```

pub mod embed;
pub mod error;
pub mod index;
pub mod tfidf;
pub mod vector;

pub use embed::{build_embedder, Embedder, EmbedderKind, HashEmbedder, MINILM_DIM};
#[cfg(feature = "fastembed")]
pub use embed::FastEmbedder;
pub use error::{Error, Result};
pub use index::{FlatIndex, Neighbor};
pub use tfidf::{TfidfMatrix, TfidfVectorizer};
pub use vector::Vector;
