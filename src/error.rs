//! Error types for driver selection and launch.
//!
//! A small `thiserror` hierarchy: selection failures are reported by this
//! crate, while construction failures from the underlying browser library
//! pass through untranslated.

use thiserror::Error;

/// The error type for `DriverFactory` operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The requested driver kind is not in the supported table.
    ///
    /// Recoverable: call [`DriverFactory::set_kind`] with a supported kind
    /// and retry.
    ///
    /// [`DriverFactory::set_kind`]: crate::DriverFactory::set_kind
    #[error("driver kind '{kind}' is not supported (supported kinds: {})", .supported.join(", "))]
    UnsupportedDriver {
        /// The kind that was requested.
        kind: String,
        /// Kinds the factory can produce, in lookup order.
        supported: Vec<&'static str>,
    },

    /// The browser configuration was rejected by the underlying library.
    #[error("invalid browser configuration: {0}")]
    Config(String),

    /// Driver construction failed inside ChromiumOxide (missing binary,
    /// version mismatch, ...). Propagated as-is, no retry is attempted.
    #[error(transparent)]
    Launch(#[from] chromiumoxide::error::CdpError),
}

/// Result type alias for `DriverFactory` operations.
pub type Result<T> = std::result::Result<T, Error>;
