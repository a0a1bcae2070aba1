use thiserror::Error;

pub type Result<T> = std::result::Result<T, RecommendError>;

#[derive(Error, Debug)]
pub enum RecommendError {
    #[error("Users list is empty")]
    EmptyPool,

    #[error("User ID not found in users list")]
    UserNotFound(String),

    #[error("Missing field `{field}` on {entity}")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },

    #[error(transparent)]
    Core(#[from] pathmatch_core::Error),
}
