//! Driver configuration helper for browser automation.
//!
//! This crate provides [`DriverFactory`], a small helper that maps a
//! driver-kind string (e.g. `"Chrome"`) to a launched, headlessly configured
//! browser driver via ChromiumOxide (CDP).
//!
//! The factory does exactly three things: look the kind up in a static
//! table, apply the fixed headless configuration, and call into the browser
//! library. Process lifecycle, pooling, retries, and the automation protocol
//! itself are out of scope; the returned [`DriverHandle`] belongs to the
//! caller.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use driver_config::DriverFactory;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let factory = DriverFactory::new("Chrome");
//!     let driver = factory.get_driver().await?;
//!
//!     let page = driver.inner().new_page("https://example.com").await?;
//!     println!("title: {:?}", page.get_title().await?);
//!
//!     driver.close().await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod factory;

// Re-exports for convenience
pub use error::{Error, Result};
pub use factory::{supported_kinds, DriverFactory, DriverHandle};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
