// crates/reviewlink-core/src/loader/mod.rs

//! # Script Loader
//!
//! Loads the third-party maps script at most once per page lifetime.
//!
//! All callers that arrive while a load is running get a clone of the same
//! [`LoadFuture`]; the attempt settles the shared [`LoadState`] exactly once,
//! from inside that future. A failed attempt leaves the loader retryable:
//! the next call starts a new attempt with a new readiness callback.

use crate::error::{Error, Result};
use futures::future::{self, FutureExt, LocalBoxFuture, Shared};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, warn};

mod host;

pub use host::{
    ReadyHook, ScriptHost, ScriptRequest, SleepFuture, Timer, TransportFuture, CALLBACK_PREFIX,
    SCRIPT_BASE_URL,
};

/// How long an attempt waits for the readiness callback.
pub const LOAD_TIMEOUT: Duration = Duration::from_secs(10);

/// The future every caller awaits. Clones of one attempt compare equal
/// under [`Shared::ptr_eq`].
pub type LoadFuture = Shared<LocalBoxFuture<'static, Result<()>>>;

enum LoadState {
    Unloaded,
    Loading { attempt: u64, pending: LoadFuture },
    Loaded,
    Failed(Error),
}

/// Snapshot of the loader state for status displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadPhase {
    Unloaded,
    Loading,
    Loaded,
    Failed(Error),
}

struct Inner<H, T> {
    host: H,
    timer: T,
    script_base: String,
    state: RefCell<LoadState>,
    attempts: Cell<u64>,
}

/// Single-flight loader over a [`ScriptHost`] and a [`Timer`].
///
/// Cloning is cheap and every clone shares the same state.
pub struct ScriptLoader<H, T> {
    inner: Rc<Inner<H, T>>,
}

impl<H, T> Clone for ScriptLoader<H, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<H: ScriptHost, T: Timer> ScriptLoader<H, T> {
    pub fn new(host: H, timer: T) -> Self {
        Self::with_script_base(host, timer, SCRIPT_BASE_URL)
    }

    /// Loads the script from `script_base` instead of the public endpoint.
    pub fn with_script_base(host: H, timer: T, script_base: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(Inner {
                host,
                timer,
                script_base: script_base.into(),
                state: RefCell::new(LoadState::Unloaded),
                attempts: Cell::new(0),
            }),
        }
    }

    pub fn host(&self) -> &H {
        &self.inner.host
    }

    /// Number of attempts started so far.
    pub fn attempts(&self) -> u64 {
        self.inner.attempts.get()
    }

    pub fn state(&self) -> LoadPhase {
        match &*self.inner.state.borrow() {
            LoadState::Unloaded => LoadPhase::Unloaded,
            LoadState::Loading { .. } => LoadPhase::Loading,
            LoadState::Loaded => LoadPhase::Loaded,
            LoadState::Failed(e) => LoadPhase::Failed(e.clone()),
        }
    }

    /// Makes sure the maps script is loaded.
    ///
    /// - already loaded: resolves at once; `Loaded` is final
    /// - capability already present: resolves at once, no request issued
    /// - load in flight: returns that attempt's future
    /// - otherwise: starts a new attempt
    ///
    /// The attempt runs when the returned future is first polled.
    pub fn ensure_loaded(&self, api_key: &str) -> LoadFuture {
        if api_key.trim().is_empty() {
            return settled(Err(Error::InvalidInput("API key is empty".into())));
        }

        let mut state = self.inner.state.borrow_mut();
        match &*state {
            LoadState::Loaded => return settled(Ok(())),
            LoadState::Loading { attempt, pending } => {
                debug!(attempt, "joining in-flight maps script load");
                return pending.clone();
            }
            LoadState::Unloaded | LoadState::Failed(_) => {}
        }

        if self.inner.host.probe() {
            *state = LoadState::Loaded;
            return settled(Ok(()));
        }

        let attempt = self.inner.attempts.get() + 1;
        self.inner.attempts.set(attempt);
        let request = ScriptRequest::with_base(&self.inner.script_base, api_key, attempt);
        debug!(attempt, callback = request.callback_name(), "starting maps script load");

        let pending = run_attempt(Rc::clone(&self.inner), request)
            .boxed_local()
            .shared();
        *state = LoadState::Loading {
            attempt,
            pending: pending.clone(),
        };
        pending
    }
}

fn settled(outcome: Result<()>) -> LoadFuture {
    future::ready(outcome).boxed_local().shared()
}

async fn run_attempt<H: ScriptHost, T: Timer>(
    inner: Rc<Inner<H, T>>,
    request: ScriptRequest,
) -> Result<()> {
    let outcome = inner.race(&request).await;
    inner.host.release(&request);
    inner.settle(request.attempt(), &outcome);
    outcome
}

impl<H: ScriptHost, T: Timer> Inner<H, T> {
    /// Races the readiness hook against the transport result and the timer.
    ///
    /// A successful transport only means the bytes arrived; the attempt keeps
    /// waiting for the hook or the timer.
    async fn race(&self, request: &ScriptRequest) -> Result<()> {
        let (hook, mut ready) = ReadyHook::pair();
        let mut transport = self.host.inject(request, hook).fuse();
        let mut timeout = self.timer.sleep(LOAD_TIMEOUT).fuse();

        loop {
            futures::select! {
                signal = ready => {
                    return match signal {
                        Ok(()) => self.verify(),
                        Err(_) => Err(Error::LoadFailure(
                            "readiness callback was dropped before it fired".into(),
                        )),
                    };
                }
                loaded = transport => {
                    if let Err(reason) = loaded {
                        return Err(Error::LoadFailure(reason));
                    }
                }
                () = timeout => return Err(Error::Timeout),
            }
        }
    }

    /// The callback can fire while the library is still half initialized.
    fn verify(&self) -> Result<()> {
        if self.host.probe() {
            Ok(())
        } else {
            Err(Error::IncompleteLoad)
        }
    }

    fn settle(&self, attempt: u64, outcome: &Result<()>) {
        let mut state = self.state.borrow_mut();
        let current = matches!(&*state, LoadState::Loading { attempt: a, .. } if *a == attempt);
        if !current {
            return;
        }
        *state = match outcome {
            Ok(()) => {
                debug!(attempt, "maps script loaded");
                LoadState::Loaded
            }
            Err(e) => {
                warn!(attempt, error = %e, "maps script load failed");
                LoadState::Failed(e.clone())
            }
        };
    }
}
