use crate::error::{RecommendError, Result};
use crate::profile::{id_text, mentor_features, student_features};
use ahash::AHashSet;
use pathmatch_core::{Embedder, FlatIndex};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

pub const DEFAULT_MENTOR_TOP_N: usize = 5;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MentorRecommendation {
    #[serde(rename = "_id")]
    pub id: Value,
    #[serde(rename = "userId")]
    pub user_id: Value,
    /// `1 - squared L2 distance` between student and mentor embeddings
    #[serde(rename = "similarityScore")]
    pub similarity_score: f32,
}

struct MentorEntry {
    id: Value,
    key: String,
    user_id: Value,
    features: String,
}

fn prepare(mentor: &Value) -> Result<MentorEntry> {
    let key = id_text(mentor).ok_or(RecommendError::MissingField {
        entity: "mentor",
        field: "_id",
    })?;
    let user_id = mentor
        .get("userId")
        .and_then(|account| account.get("_id"))
        .filter(|id| !id.is_null())
        .cloned()
        .ok_or(RecommendError::MissingField {
            entity: "mentor",
            field: "userId._id",
        })?;

    Ok(MentorEntry {
        id: mentor.get("_id").cloned().unwrap_or(Value::Null),
        key,
        user_id,
        features: mentor_features(mentor),
    })
}

/// Find the mentors whose profiles embed closest to the student's
pub fn recommend_mentors(
    embedder: &dyn Embedder,
    student: &Value,
    mentors: &[Value],
    top_n: usize,
) -> Result<Vec<MentorRecommendation>> {
    let top_n = top_n.min(mentors.len());
    if top_n == 0 {
        return Ok(Vec::new());
    }

    let entries = mentors.iter().map(prepare).collect::<Result<Vec<_>>>()?;
    let student_text = student_features(student);

    let texts: Vec<&str> = entries.iter().map(|e| e.features.as_str()).collect();
    let mentor_vectors = embedder.embed(&texts)?;
    let student_vector = embedder.embed_one(&student_text)?;

    let index = FlatIndex::from_vectors(&mentor_vectors)?;
    let neighbors = index.search(&student_vector, top_n)?;

    let mut seen: AHashSet<&str> = AHashSet::new();
    let mut recommendations = Vec::with_capacity(neighbors.len());
    for neighbor in neighbors {
        let entry = &entries[neighbor.position];
        if !seen.insert(entry.key.as_str()) {
            continue;
        }
        recommendations.push(MentorRecommendation {
            id: entry.id.clone(),
            user_id: entry.user_id.clone(),
            similarity_score: 1.0 - neighbor.distance,
        });
    }

    info!(
        mentors = mentors.len(),
        returned = recommendations.len(),
        model = embedder.model_name(),
        "Recommended mentors"
    );
    Ok(recommendations)
}
