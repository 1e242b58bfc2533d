// crates/reviewlink-core/src/loader/host.rs

//! Seams between the loader and the environment it runs in.
//!
//! The browser build implements these over the DOM and `setTimeout`; tests
//! implement them in memory.

use futures::channel::oneshot;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

pub const SCRIPT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/js";

/// Prefix of the per-attempt readiness callback name.
pub const CALLBACK_PREFIX: &str = "__reviewlink_ready_";

/// Resolves when the transport finishes: `Ok` once the resource arrived,
/// `Err` with the reason when the request itself failed.
pub type TransportFuture = Pin<Box<dyn Future<Output = Result<(), String>>>>;

pub type SleepFuture = Pin<Box<dyn Future<Output = ()>>>;

/// Environment that can detect, fetch and clean up the maps script.
pub trait ScriptHost: 'static {
    /// `true` when the places capability is present right now.
    fn probe(&self) -> bool;

    /// Starts fetching `request` and arranges for `hook` to be fired when
    /// the script calls its readiness callback.
    fn inject(&self, request: &ScriptRequest, hook: ReadyHook) -> TransportFuture;

    /// Unregisters the readiness callback of `request`. Called once per
    /// attempt, whatever the outcome.
    fn release(&self, request: &ScriptRequest);
}

pub trait Timer: 'static {
    fn sleep(&self, duration: Duration) -> SleepFuture;
}

/// One-shot readiness signal for a single load attempt.
#[derive(Debug)]
pub struct ReadyHook {
    tx: oneshot::Sender<()>,
}

impl ReadyHook {
    pub(crate) fn pair() -> (Self, oneshot::Receiver<()>) {
        let (tx, rx) = oneshot::channel();
        (Self { tx }, rx)
    }

    /// Signals readiness. Firing after the attempt has ended is a no-op.
    pub fn fire(self) {
        let _ = self.tx.send(());
    }
}

/// Everything a host needs to issue one load attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRequest {
    attempt: u64,
    callback_name: String,
    url: String,
}

impl ScriptRequest {
    pub fn new(api_key: &str, attempt: u64) -> Self {
        Self::with_base(SCRIPT_BASE_URL, api_key, attempt)
    }

    pub fn with_base(base: &str, api_key: &str, attempt: u64) -> Self {
        let callback_name = format!("{CALLBACK_PREFIX}{attempt}");
        let url = format!(
            "{base}?key={}&libraries=places&loading=async&callback={callback_name}",
            urlencoding::encode(api_key.trim()),
        );
        Self {
            attempt,
            callback_name,
            url,
        }
    }

    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    /// Global name the script calls once it has initialized.
    pub fn callback_name(&self) -> &str {
        &self.callback_name
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}
