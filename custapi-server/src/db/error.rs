//! Database error type

/// Failure talking to the store.
///
/// `Connection` covers acquiring a connection (pool exhausted past the
/// acquire timeout, store unreachable). `Query` covers everything after a
/// connection was obtained. The display text is the store's own message.
/// `Task` means the detached statement task died before reporting back.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("{}", store_message(.0))]
    Connection(#[source] sqlx::Error),

    #[error("{}", store_message(.0))]
    Query(#[source] sqlx::Error),

    #[error("statement expects {expected} parameters, got {actual}")]
    ParamCount { expected: usize, actual: usize },

    /// The task running the statement panicked or was cancelled
    #[error("statement task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl DbError {
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

fn store_message(err: &sqlx::Error) -> String {
    match err {
        sqlx::Error::Database(db) => db.message().to_owned(),
        other => other.to_string(),
    }
}
