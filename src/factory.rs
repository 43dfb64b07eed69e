//! Driver selection and launch.
//!
//! [`DriverFactory`] maps a driver-kind string to a concrete launch routine
//! through a static lookup table, applies the fixed headless configuration,
//! and hands back the resulting [`DriverHandle`]. The factory keeps no
//! reference to handles it has produced; every call launches a fresh driver
//! and the caller owns its lifecycle.

use crate::error::{Error, Result};
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use std::future::Future;
use std::pin::Pin;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

type LaunchFuture = Pin<Box<dyn Future<Output = Result<DriverHandle>> + Send>>;

/// One row of the supported-driver table: a kind name plus the routine that
/// turns options into a running driver.
#[derive(Debug)]
pub(crate) struct DriverEntry {
    pub(crate) name: &'static str,
    pub(crate) launch: fn(DriverOptions) -> LaunchFuture,
}

/// Kind-name to constructor mapping. Adding a driver family means adding one
/// entry here and a launch routine for it.
static SUPPORTED_DRIVERS: &[DriverEntry] = &[DriverEntry {
    name: "Chrome",
    launch: launch_chrome,
}];

/// Names of the driver kinds [`DriverFactory`] can produce, in lookup order.
pub fn supported_kinds() -> impl Iterator<Item = &'static str> {
    SUPPORTED_DRIVERS.iter().map(|entry| entry.name)
}

/// Fixed configuration applied to whichever driver family is selected.
///
/// Headless mode is the only knob, and `get_driver` always enables it.
/// The configuration surface is fixed, so the type is not exported.
#[derive(Debug, Clone)]
pub(crate) struct DriverOptions {
    /// Run the browser without a visible window (default: true).
    pub(crate) headless: bool,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self { headless: true }
    }
}

impl DriverOptions {
    /// Command-line flags equivalent to these options.
    pub(crate) fn chrome_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if self.headless {
            args.push("--headless".to_string());
        }
        args
    }
}

/// Opaque handle to a launched browser driver.
///
/// Owns the ChromiumOxide [`Browser`] plus the task draining its CDP event
/// stream. The factory performs no pooling or cleanup; dropping or closing
/// the handle is up to the caller.
#[derive(Debug)]
pub struct DriverHandle {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl DriverHandle {
    /// Get the underlying ChromiumOxide browser.
    pub fn inner(&self) -> &Browser {
        &self.browser
    }

    /// Get the underlying ChromiumOxide browser mutably.
    pub fn inner_mut(&mut self) -> &mut Browser {
        &mut self.browser
    }

    /// Close the browser and wait for its event handler to finish.
    pub async fn close(mut self) -> Result<()> {
        self.browser.close().await?;
        let _ = self.handler.await;
        debug!("driver closed");
        Ok(())
    }
}

/// Translates a driver-kind string into a running, headlessly configured
/// browser driver.
///
/// The stored kind is taken verbatim; validity is checked only when
/// [`get_driver`](DriverFactory::get_driver) is called, never at assignment
/// time.
#[derive(Debug)]
pub struct DriverFactory {
    kind: String,
    registry: &'static [DriverEntry],
}

impl DriverFactory {
    /// Create a factory for the given driver kind.
    ///
    /// The kind is stored as-is; an unsupported value surfaces later as
    /// [`Error::UnsupportedDriver`] from `get_driver`.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            registry: SUPPORTED_DRIVERS,
        }
    }

    #[cfg(test)]
    fn with_registry(kind: impl Into<String>, registry: &'static [DriverEntry]) -> Self {
        Self {
            kind: kind.into(),
            registry,
        }
    }

    /// The currently selected driver kind.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Overwrite the selected driver kind.
    ///
    /// No validation happens here; the new kind takes effect for subsequent
    /// `get_driver` calls.
    pub fn set_kind(&mut self, kind: impl Into<String>) {
        self.kind = kind.into();
    }

    fn resolve(&self) -> Result<&'static DriverEntry> {
        self.registry
            .iter()
            .find(|entry| entry.name == self.kind)
            .ok_or_else(|| Error::UnsupportedDriver {
                kind: self.kind.clone(),
                supported: self.registry.iter().map(|entry| entry.name).collect(),
            })
    }

    /// Launch a driver for the selected kind and return its handle.
    ///
    /// Each call produces an independent driver; nothing is cached or
    /// reused. Launch failures from the underlying library propagate
    /// untranslated.
    #[instrument(skip(self), fields(kind = %self.kind))]
    pub async fn get_driver(&self) -> Result<DriverHandle> {
        let entry = self.resolve()?;
        debug!("resolved driver kind");
        (entry.launch)(DriverOptions::default()).await
    }
}

fn launch_chrome(options: DriverOptions) -> LaunchFuture {
    Box::pin(async move {
        info!(headless = options.headless, "launching Chrome");

        let mut builder = BrowserConfig::builder();
        if !options.headless {
            builder = builder.with_head();
        }
        for arg in options.chrome_args() {
            builder = builder.arg(arg);
        }
        let config = builder.build().map_err(Error::Config)?;

        let (browser, mut handler) = Browser::launch(config).await?;

        // Drain CDP events until the browser goes away
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
            debug!("driver event handler finished");
        });

        info!("Chrome launched");

        Ok(DriverHandle {
            browser,
            handler: handler_task,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static STUB_CALLS: Mutex<Vec<DriverOptions>> = Mutex::new(Vec::new());

    fn stub_launch(options: DriverOptions) -> LaunchFuture {
        Box::pin(async move {
            STUB_CALLS.lock().unwrap().push(options);
            Err(Error::Config("stub driver".to_string()))
        })
    }

    static STUB_REGISTRY: &[DriverEntry] = &[DriverEntry {
        name: "Chrome",
        launch: stub_launch,
    }];

    // Separate non-recording stub so the call-count test above cannot be
    // perturbed by other tests running in parallel.
    fn stub_launch_silent(_options: DriverOptions) -> LaunchFuture {
        Box::pin(async { Err(Error::Config("stub driver".to_string())) })
    }

    static SILENT_REGISTRY: &[DriverEntry] = &[DriverEntry {
        name: "Chrome",
        launch: stub_launch_silent,
    }];

    #[test]
    fn test_driver_options_default_headless() {
        let options = DriverOptions::default();
        assert!(options.headless);
        assert!(options
            .chrome_args()
            .contains(&"--headless".to_string()));
    }

    #[test]
    fn test_chrome_args_empty_without_headless() {
        let options = DriverOptions { headless: false };
        assert!(options.chrome_args().is_empty());
    }

    #[test]
    fn test_supported_kinds_contains_chrome() {
        let kinds: Vec<_> = supported_kinds().collect();
        assert_eq!(kinds, vec!["Chrome"]);
    }

    #[test]
    fn test_resolve_unknown_kind() {
        let factory = DriverFactory::new("Firefox");
        let err = factory.resolve().unwrap_err();
        match err {
            Error::UnsupportedDriver { kind, supported } => {
                assert_eq!(kind, "Firefox");
                assert_eq!(supported, vec!["Chrome"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_stub_constructor_receives_headless_config() {
        STUB_CALLS.lock().unwrap().clear();

        let factory = DriverFactory::with_registry("Chrome", STUB_REGISTRY);

        // The stub fails after recording, so dispatch reaching it shows up
        // as a Config error rather than UnsupportedDriver.
        let err = factory.get_driver().await.unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = factory.get_driver().await.unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let calls = STUB_CALLS.lock().unwrap();
        assert_eq!(calls.len(), 2, "each get_driver call constructs anew");
        for options in calls.iter() {
            assert!(options.chrome_args().contains(&"--headless".to_string()));
        }
    }

    #[tokio::test]
    async fn test_set_kind_redirects_dispatch() {
        let mut factory = DriverFactory::with_registry("Firefox", SILENT_REGISTRY);

        let err = factory.get_driver().await.unwrap_err();
        assert!(matches!(err, Error::UnsupportedDriver { .. }));

        factory.set_kind("Chrome");
        let err = factory.get_driver().await.unwrap_err();
        assert!(matches!(err, Error::Config(_)), "stub was reached");
    }
}
