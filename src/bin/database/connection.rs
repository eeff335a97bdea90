use std::ops::{Deref, DerefMut};

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel::Connection;
use tracing::{trace, trace_span};

use crate::config::DatabaseConfig;
use crate::database::error::RepositoryError;

pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Hands out one connection per repository operation.
pub enum ConnectionFactory {
    /// Opens and closes a connection for every call.
    Direct { connection_string: String },
    Pooled(PgPool),
}

/// Released when dropped, whichever way the operation ends.
pub enum DbConnection {
    Direct(PgConnection),
    Pooled(PooledConnection<ConnectionManager<PgConnection>>),
}

impl ConnectionFactory {
    pub fn from_config(config: &DatabaseConfig) -> Self {
        let span = trace_span!("creating connection factory");
        let _guard = span.enter();

        let connection_string = config.connection_string();

        match config.pool_size {
            Some(max_size) => {
                trace!(max_size, "Creating pool");
                let manager = ConnectionManager::<PgConnection>::new(connection_string);

                // Unchecked so that start-up does not need the database
                let pool = Pool::builder()
                    .max_size(max_size)
                    .min_idle(Some(0))
                    .build_unchecked(manager);

                ConnectionFactory::Pooled(pool)
            }
            None => {
                trace!("Using a direct connection per operation");
                ConnectionFactory::Direct { connection_string }
            }
        }
    }

    pub fn open(&self) -> Result<DbConnection, RepositoryError> {
        let span = trace_span!("opening connection");
        let _guard = span.enter();

        match self {
            ConnectionFactory::Direct { connection_string } => {
                let connection = PgConnection::establish(connection_string)?;
                Ok(DbConnection::Direct(connection))
            }
            ConnectionFactory::Pooled(pool) => Ok(DbConnection::Pooled(pool.get()?)),
        }
    }
}

impl Deref for DbConnection {
    type Target = PgConnection;

    fn deref(&self) -> &Self::Target {
        match self {
            DbConnection::Direct(connection) => connection,
            DbConnection::Pooled(connection) => connection,
        }
    }
}

impl DerefMut for DbConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        match self {
            DbConnection::Direct(connection) => connection,
            DbConnection::Pooled(connection) => connection,
        }
    }
}
