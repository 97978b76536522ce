//! Error types and the crate result alias.

/// A result type returning maskforge errors.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The error type for maskforge functions.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A configuration-consistency failure, naming the offending field.
    ///
    /// All geometry construction is deterministic, so these are caught before
    /// any shapes are built; a malformed intermediate shape would poison every
    /// downstream boolean operation.
    #[error("invalid configuration: `{field}`: {reason}")]
    Config {
        /// The configuration field that failed validation.
        field: &'static str,
        /// Why the field is invalid.
        reason: String,
    },
    /// An error writing the GDS output artifact.
    #[error("error writing GDS file: {0:?}")]
    GdsWrite(gds21::GdsError),
}

impl Error {
    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Config {
            field,
            reason: reason.into(),
        }
    }
}

impl From<gds21::GdsError> for Error {
    fn from(value: gds21::GdsError) -> Self {
        Self::GdsWrite(value)
    }
}
