use std::io;

/// An error from discovering a schema or writing the generated models
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The dialect selector (or URL scheme) names no supported database
    #[error("Unsupported dialect `{0}`, expected one of: mysql, postgres, sqlite")]
    UnsupportedDialect(String),
    /// A catalog query failed
    #[error("Failed to {context}: {source}")]
    Query {
        context: String,
        #[source]
        source: sqlx::Error,
    },
    /// Reading or writing a file failed
    #[error(transparent)]
    StdIoError(#[from] io::Error),
    /// The discovered schema could not be turned into entities
    #[error("{0}")]
    TransformError(String),
}

impl Error {
    pub(crate) fn query<C>(context: C) -> impl FnOnce(sqlx::Error) -> Self
    where
        C: Into<String>,
    {
        let context = context.into();
        move |source| Self::Query { context, source }
    }
}
