use crate::error::{RecommendError, Result};
use crate::profile::{id_text, job_features, seeker_features, value_text};
use ahash::AHashSet;
use pathmatch_core::{Embedder, FlatIndex};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

pub const DEFAULT_JOB_TOP_N: usize = 3;

/// Candidates fetched per requested result, so duplicates can be dropped
const OVERSAMPLE: usize = 3;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct JobRecommendation {
    /// The job document exactly as it was submitted
    pub job: Value,
    /// `1 / (1 + squared L2 distance)`, in `(0, 1]`
    pub score: f32,
}

fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Match a job seeker against a pool of job postings
pub fn recommend_jobs(
    embedder: &dyn Embedder,
    user: &Value,
    jobs: &[Value],
    top_n: usize,
) -> Result<Vec<JobRecommendation>> {
    info!(
        user_id = %id_text(user).unwrap_or_else(|| "unknown".to_string()),
        jobs = jobs.len(),
        "Starting job recommendations"
    );
    if jobs.is_empty() || top_n == 0 {
        return Ok(Vec::new());
    }

    let keys = jobs
        .iter()
        .map(|job| {
            id_text(job).ok_or(RecommendError::MissingField {
                entity: "job",
                field: "_id",
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let job_texts: Vec<String> = jobs.iter().map(job_features).collect();
    let seeker_text = seeker_features(user);
    debug!(features = preview(&seeker_text, 200), "Preprocessed seeker features");

    let texts: Vec<&str> = job_texts.iter().map(String::as_str).collect();
    let job_vectors = embedder.embed(&texts)?;
    let seeker_vector = embedder.embed_one(&seeker_text)?;

    let index = FlatIndex::from_vectors(&job_vectors)?;
    let search_n = top_n.saturating_mul(OVERSAMPLE).min(jobs.len());
    let neighbors = index.search(&seeker_vector, search_n)?;

    let mut seen: AHashSet<&str> = AHashSet::new();
    let mut recommendations = Vec::with_capacity(top_n.min(jobs.len()));
    for neighbor in neighbors {
        if recommendations.len() >= top_n {
            break;
        }

        let job = &jobs[neighbor.position];
        let key = keys[neighbor.position].as_str();
        if !seen.insert(key) {
            debug!(job_id = key, title = %value_text(job.get("title")), "Skipping duplicate job");
            continue;
        }

        let score = 1.0 / (1.0 + neighbor.distance);
        debug!(job_id = key, title = %value_text(job.get("title")), score, "Recommended job");
        recommendations.push(JobRecommendation {
            job: job.clone(),
            score,
        });
    }

    info!(count = recommendations.len(), "Returning unique job recommendations");
    Ok(recommendations)
}
