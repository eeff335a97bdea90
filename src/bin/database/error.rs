use diesel::r2d2::PoolError;
use diesel::result::Error as QueryError;
use diesel::ConnectionError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name is required.")]
    EmptyName,
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("could not connect to the database: {0}")]
    Connection(#[from] ConnectionError),

    #[error("could not get a database connection from the pool: {0}")]
    Pool(#[from] PoolError),

    #[error("database statement failed: {0}")]
    Query(#[from] QueryError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl RepositoryError {
    /// Database unreachable or credentials rejected.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Pool(_))
    }
}
