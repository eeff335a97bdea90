use std::{io, path::PathBuf};

use thiserror::Error;

use crate::database::error::RepositoryError;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected data at {location}: {reason}")]
    Shape { location: String, reason: String },

    #[error("recipe {recipe:?} uses unknown ingredient {ingredient:?}")]
    UnknownIngredient { recipe: String, ingredient: String },

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("database statement failed: {0}")]
    Query(#[from] diesel::result::Error),
}

impl ImportError {
    pub fn shape(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Shape {
            location: location.into(),
            reason: reason.into(),
        }
    }
}
