//! # pathmatch
//!
//! Profile recommendations and content moderation for a mentoring and jobs
//! platform, served over a small JSON API.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! pathmatch --port 8000
//! # real sentence embeddings (downloads all-MiniLM-L6-v2 on first start)
//! cargo run --release --features fastembed -- --embedder fastembed
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use pathmatch::prelude::*;
//! use serde_json::json;
//!
//! let users = vec![
//!     json!({"_id": "a", "name": "Ana", "username": "ana", "skills": ["Rust", "Go"]}),
//!     json!({"_id": "b", "name": "Ben", "username": "ben", "skills": ["Rust"]}),
//!     json!({"_id": "c", "name": "Cy", "username": "cy", "skills": ["Pottery"]}),
//! ];
//! let picks = recommend_users("a", &users, 1).unwrap();
//! assert_eq!(picks[0].username, "ben");
//!
//! let moderator = Moderator::default();
//! assert!(moderator.moderate("total bullshit").flagged);
//! ```
//!
//! ## Crate Structure
//!
//! - `pathmatch-core` - vectors, TF-IDF, flat L2 index, sentence embedders
//! - `pathmatch-recommend` - user, mentor and job recommenders
//! - `pathmatch-moderation` - fuzzy profanity screening
//! - `pathmatch-api` - REST endpoints

// Re-export core types
pub use pathmatch_core::{
    build_embedder, Embedder, EmbedderKind, Error, FlatIndex, HashEmbedder, Neighbor, Result,
    TfidfMatrix, TfidfVectorizer, Vector,
};

#[cfg(feature = "fastembed")]
pub use pathmatch_core::FastEmbedder;

// Re-export recommenders
pub use pathmatch_recommend::{
    recommend_jobs, recommend_mentors, recommend_users, JobRecommendation,
    MentorRecommendation, RecommendError, UserRecommendation,
};

// Re-export moderation
pub use pathmatch_moderation::{Blocklist, ModerationVerdict, Moderator};

// Re-export API
pub use pathmatch_api::{AppState, RecommendationLimits, RestApi, ServerConfig};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        recommend_jobs, recommend_mentors, recommend_users, Blocklist, Embedder, HashEmbedder,
        JobRecommendation, MentorRecommendation, ModerationVerdict, Moderator, RecommendError,
        UserRecommendation,
    };
}

/// Feature-string builders used by the recommenders
pub mod profile {
    pub use pathmatch_recommend::profile::{
        job_features, mentor_features, seeker_features, student_features, user_features,
    };
}
