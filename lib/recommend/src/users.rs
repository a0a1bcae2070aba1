use crate::error::{RecommendError, Result};
use crate::profile::{id_text, user_features, value_text};
use pathmatch_core::TfidfVectorizer;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, warn};

pub const DEFAULT_USER_TOP_N: usize = 5;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserRecommendation {
    #[serde(rename = "_id")]
    pub id: Value,
    pub name: String,
    pub username: String,
    pub combined_features: String,
    pub score: f32,
}

struct Candidate<'a> {
    id: String,
    profile: &'a Value,
    features: String,
}

/// Rank `users` by TF-IDF cosine similarity to the user with `user_id`.
///
/// The requesting user is never part of the result. Ties keep the order of
/// the incoming pool.
pub fn recommend_users(
    user_id: &str,
    users: &[Value],
    top_n: usize,
) -> Result<Vec<UserRecommendation>> {
    if users.is_empty() {
        return Err(RecommendError::EmptyPool);
    }

    if !users.iter().any(|u| id_text(u).as_deref() == Some(user_id)) {
        return Err(RecommendError::UserNotFound(user_id.to_string()));
    }

    let mut candidates = Vec::with_capacity(users.len());
    for user in users {
        let id = id_text(user).ok_or(RecommendError::MissingField {
            entity: "user",
            field: "_id",
        })?;
        let features = user_features(user);
        if features.trim().is_empty() {
            warn!(user_id = %id, "Skipping user with empty combined features");
            continue;
        }
        candidates.push(Candidate {
            id,
            profile: user,
            features,
        });
    }

    if candidates.is_empty() {
        error!("No valid users found for recommendations");
        return Ok(Vec::new());
    }

    let Some(target) = candidates.iter().position(|c| c.id == user_id) else {
        warn!(user_id, "Requesting user has no usable features");
        return Ok(Vec::new());
    };

    let documents: Vec<&str> = candidates.iter().map(|c| c.features.as_str()).collect();
    let matrix = TfidfVectorizer::new().fit_transform(&documents);
    info!(
        users = candidates.len(),
        vocabulary = matrix.vocabulary_len(),
        "Vectorized user features"
    );

    let similarities = matrix.similarities_to(target);
    let mut ranked: Vec<usize> = (0..candidates.len()).collect();
    // Stable sort: equal scores stay in pool order
    ranked.sort_by(|&a, &b| {
        similarities[b]
            .partial_cmp(&similarities[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let recommendations: Vec<UserRecommendation> = ranked
        .into_iter()
        .filter(|&i| i != target)
        .take(top_n)
        .map(|i| {
            let candidate = &candidates[i];
            UserRecommendation {
                id: candidate.profile.get("_id").cloned().unwrap_or(Value::Null),
                name: value_text(candidate.profile.get("name")),
                username: value_text(candidate.profile.get("username")),
                combined_features: candidate.features.clone(),
                score: similarities[i],
            }
        })
        .collect();

    debug!(user_id, count = recommendations.len(), "User recommendations ready");
    Ok(recommendations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pool() -> Vec<Value> {
        vec![
            json!({
                "_id": "alice",
                "name": "Alice",
                "username": "alice",
                "skills": ["Rust", "Distributed Systems"],
                "industry": "Software",
                "education": [{"fieldOfStudy": "Computer Science"}]
            }),
            json!({
                "_id": "bob",
                "name": "Bob",
                "username": "bob",
                "skills": ["Watercolor", "Illustration"],
                "industry": "Art",
                "education": [{"fieldOfStudy": "Fine Arts"}]
            }),
            json!({
                "_id": "carol",
                "name": "Carol",
                "skills": ["Rust", "Kubernetes"],
                "industry": "Software",
                "education": [{"fieldOfStudy": "Computer Science"}]
            }),
            json!({
                "_id": "dave",
                "username": "dave",
                "skills": ["Go", "Distributed Systems"],
                "industry": "Software"
            }),
        ]
    }

    #[test]
    fn test_ranks_by_similarity_and_excludes_self() {
        let results = recommend_users("alice", &pool(), 5).unwrap();
        let ids: Vec<&str> = results.iter().map(|r| r.id.as_str().unwrap()).collect();

        assert_eq!(ids.len(), 3);
        assert!(!ids.contains(&"alice"));
        assert_eq!(ids[0], "carol");
        assert_eq!(ids[2], "bob");
        assert!(results[0].score >= results[1].score);
        assert!(results[1].score >= results[2].score);
    }

    #[test]
    fn test_top_n_limits_results() {
        let results = recommend_users("alice", &pool(), 1).unwrap();
        assert_eq!(results.len(), 1);
        assert!(recommend_users("alice", &pool(), 0).unwrap().is_empty());
    }

    #[test]
    fn test_result_fields() {
        let results = recommend_users("bob", &pool(), 5).unwrap();
        let carol = results.iter().find(|r| r.id == json!("carol")).unwrap();
        assert_eq!(carol.name, "Carol");
        assert_eq!(carol.username, "");
        assert_eq!(carol.combined_features, "Rust Kubernetes Software Computer Science");
    }

    #[test]
    fn test_ties_keep_pool_order() {
        let users = vec![
            json!({"_id": "me", "skills": ["rust"]}),
            json!({"_id": "x", "skills": ["cobol"]}),
            json!({"_id": "y", "skills": ["fortran"]}),
        ];
        let results = recommend_users("me", &users, 5).unwrap();
        let ids: Vec<&str> = results.iter().map(|r| r.id.as_str().unwrap()).collect();
        assert_eq!(ids, vec!["x", "y"]);
    }

    #[test]
    fn test_empty_pool() {
        assert!(matches!(
            recommend_users("alice", &[], 5),
            Err(RecommendError::EmptyPool)
        ));
    }

    #[test]
    fn test_unknown_user() {
        assert!(matches!(
            recommend_users("zoe", &pool(), 5),
            Err(RecommendError::UserNotFound(id)) if id == "zoe"
        ));
    }

    #[test]
    fn test_user_without_id_is_rejected() {
        let mut users = pool();
        users.push(json!({"name": "ghost"}));
        assert!(matches!(
            recommend_users("alice", &users, 5),
            Err(RecommendError::MissingField { field: "_id", .. })
        ));
    }

    #[test]
    fn test_single_user_pool() {
        let users = vec![json!({"_id": "solo", "skills": ["Rust"]})];
        assert!(recommend_users("solo", &users, 5).unwrap().is_empty());
    }

    fn blank_user(id: &str) -> Value {
        json!({
            "_id": id,
            "skills": [""],
            "industry": "",
            "education": [{"fieldOfStudy": ""}]
        })
    }

    #[test]
    fn test_blank_candidate_is_skipped() {
        let mut users = pool();
        users.push(blank_user("blank"));
        let results = recommend_users("alice", &users, 10).unwrap();
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.id != json!("blank")));
    }

    #[test]
    fn test_blank_requester_gets_no_recommendations() {
        let mut users = pool();
        users.push(blank_user("blank"));
        assert_eq!(recommend_users("blank", &users, 5).unwrap(), vec![]);
    }
}
