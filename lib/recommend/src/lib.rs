//! # pathmatch Recommend
//!
//! Recommenders for three candidate pools, all fed loosely shaped JSON
//! profiles:
//!
//! - [`recommend_users`] - TF-IDF + cosine similarity over skills, industry
//!   and field of study
//! - [`recommend_mentors`] - sentence embeddings + exact L2 search, student
//!   against mentor profiles
//! - [`recommend_jobs`] - sentence embeddings + exact L2 search, job seeker
//!   against postings, oversampled and deduplicated by job id
//!
//! ## Example
//!
//! ```rust
//! use pathmatch_core::HashEmbedder;
//! use pathmatch_recommend::recommend_jobs;
//! use serde_json::json;
//!
//! let embedder = HashEmbedder::default();
//! let seeker = json!({"skills": ["Rust"], "industry": "Software"});
//! let jobs = vec![
//!     json!({"_id": "j1", "title": "Rust Developer", "requirements": ["Rust"]}),
//!     json!({"_id": "j2", "title": "Baker", "requirements": ["Bread"]}),
//! ];
//!
//! let picks = recommend_jobs(&embedder, &seeker, &jobs, 1).unwrap();
//! assert_eq!(picks[0].job["_id"], "j1");
//! ```

pub mod error;
pub mod jobs;
pub mod mentors;
pub mod profile;
pub mod users;

pub use error::{RecommendError, Result};
pub use jobs::{recommend_jobs, JobRecommendation, DEFAULT_JOB_TOP_N};
pub use mentors::{recommend_mentors, MentorRecommendation, DEFAULT_MENTOR_TOP_N};
pub use users::{recommend_users, UserRecommendation, DEFAULT_USER_TOP_N};
