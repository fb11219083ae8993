use std::path::PathBuf;

/// Errors produced while loading or validating a [`Config`](crate::config::Config).
///
/// The simulation itself is infallible: numerical singularities are resolved in place
/// (see [`MassiveObject::acceleration_at`](crate::gravity::MassiveObject::acceleration_at) and
/// [`Projector::project`](crate::projection::Projector::project)).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The configuration file could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        /// Path of the file that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML or does not match the expected layout.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration parsed but describes a simulation that cannot be built.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Alias for results returned by this crate.
pub type Result<T> = std::result::Result<T, Error>;
