use futures::channel::oneshot;
use futures::join;
use reviewlink_core::loader::{
    ReadyHook, ScriptHost, ScriptLoader, ScriptRequest, SleepFuture, Timer, TransportFuture,
    LOAD_TIMEOUT,
};
use reviewlink_core::{Error, LoadPhase};
use std::cell::{Cell, RefCell};
use std::time::Duration;

/// In-memory stand-in for the browser: records every injection and lets the
/// test decide when the script "arrives" and when it calls back.
#[derive(Default)]
struct FakeHost {
    present: Cell<bool>,
    injected: RefCell<Vec<ScriptRequest>>,
    hooks: RefCell<Vec<ReadyHook>>,
    transports: RefCell<Vec<oneshot::Sender<Result<(), String>>>>,
    released: RefCell<Vec<String>>,
}

impl FakeHost {
    fn present() -> Self {
        let host = Self::default();
        host.present.set(true);
        host
    }

    fn fire_ready(&self) {
        let hook = self.hooks.borrow_mut().pop().expect("a registered hook");
        hook.fire();
    }

    fn fail_transport(&self, reason: &str) {
        let tx = self.transports.borrow_mut().pop().expect("a pending transport");
        let _ = tx.send(Err(reason.to_string()));
    }

    fn finish_transport(&self) {
        let tx = self.transports.borrow_mut().pop().expect("a pending transport");
        let _ = tx.send(Ok(()));
    }

    fn injections(&self) -> usize {
        self.injected.borrow().len()
    }
}

impl ScriptHost for FakeHost {
    fn probe(&self) -> bool {
        self.present.get()
    }

    fn inject(&self, request: &ScriptRequest, hook: ReadyHook) -> TransportFuture {
        self.injected.borrow_mut().push(request.clone());
        self.hooks.borrow_mut().push(hook);
        let (tx, rx) = oneshot::channel();
        self.transports.borrow_mut().push(tx);
        Box::pin(async move {
            match rx.await {
                Ok(outcome) => outcome,
                Err(_) => futures::future::pending().await,
            }
        })
    }

    fn release(&self, request: &ScriptRequest) {
        self.released
            .borrow_mut()
            .push(request.callback_name().to_string());
    }
}

struct TokioTimer;

impl Timer for TokioTimer {
    fn sleep(&self, duration: Duration) -> SleepFuture {
        Box::pin(tokio::time::sleep(duration))
    }
}

fn loader(host: FakeHost) -> ScriptLoader<FakeHost, TokioTimer> {
    ScriptLoader::new(host, TokioTimer)
}

#[tokio::test(start_paused = true)]
async fn already_present_issues_no_request() {
    let loader = loader(FakeHost::present());

    loader.ensure_loaded("AIza").await.unwrap();

    assert_eq!(loader.host().injections(), 0);
    assert_eq!(loader.attempts(), 0);
    assert_eq!(loader.state(), LoadPhase::Loaded);
}

#[tokio::test(start_paused = true)]
async fn concurrent_callers_share_one_attempt() {
    let loader = loader(FakeHost::default());

    let first = loader.ensure_loaded("AIza");
    let second = loader.ensure_loaded("AIza");
    assert!(first.ptr_eq(&second));
    assert_eq!(loader.state(), LoadPhase::Loading);

    let host = loader.host();
    let (a, b, ()) = join!(first, second, async {
        tokio::time::sleep(Duration::from_millis(300)).await;
        host.finish_transport();
        tokio::time::sleep(Duration::from_millis(50)).await;
        host.present.set(true);
        host.fire_ready();
    });

    assert_eq!(a, Ok(()));
    assert_eq!(b, Ok(()));
    assert_eq!(host.injections(), 1);
    assert_eq!(*host.released.borrow(), vec!["__reviewlink_ready_1".to_string()]);
    assert_eq!(loader.state(), LoadPhase::Loaded);
}

#[tokio::test(start_paused = true)]
async fn loaded_loader_resolves_immediately() {
    let loader = loader(FakeHost::default());
    let host = loader.host();

    let (first, ()) = join!(loader.ensure_loaded("AIza"), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        host.present.set(true);
        host.fire_ready();
    });
    first.unwrap();

    loader.ensure_loaded("AIza").await.unwrap();
    loader.ensure_loaded("AIza").await.unwrap();
    assert_eq!(host.injections(), 1);
    assert_eq!(loader.attempts(), 1);
}

#[tokio::test(start_paused = true)]
async fn timeout_rejects_and_retry_starts_fresh() {
    let loader = loader(FakeHost::default());

    let started = tokio::time::Instant::now();
    let outcome = loader.ensure_loaded("AIza").await;
    assert_eq!(outcome, Err(Error::Timeout));
    assert!(started.elapsed() >= LOAD_TIMEOUT);
    assert_eq!(loader.state(), LoadPhase::Failed(Error::Timeout));
    assert_eq!(loader.host().released.borrow().len(), 1);

    let host = loader.host();
    let (retry, ()) = join!(loader.ensure_loaded("AIza"), async {
        tokio::time::sleep(Duration::from_secs(1)).await;
        host.present.set(true);
        host.fire_ready();
    });

    assert_eq!(retry, Ok(()));
    assert_eq!(host.injections(), 2);
    assert_eq!(
        host.injected.borrow()[1].callback_name(),
        "__reviewlink_ready_2"
    );
    assert_eq!(loader.state(), LoadPhase::Loaded);
}

#[tokio::test(start_paused = true)]
async fn transport_error_is_load_failure() {
    let loader = loader(FakeHost::default());
    let host = loader.host();

    let (outcome, ()) = join!(loader.ensure_loaded("AIza"), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        host.fail_transport("net::ERR_NAME_NOT_RESOLVED");
    });

    assert_eq!(
        outcome,
        Err(Error::LoadFailure("net::ERR_NAME_NOT_RESOLVED".into()))
    );
    assert_eq!(host.released.borrow().len(), 1);
    assert!(matches!(loader.state(), LoadPhase::Failed(Error::LoadFailure(_))));
}

#[tokio::test(start_paused = true)]
async fn hook_without_capability_is_incomplete() {
    let loader = loader(FakeHost::default());
    let host = loader.host();

    let (outcome, ()) = join!(loader.ensure_loaded("AIza"), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        host.fire_ready();
    });

    assert_eq!(outcome, Err(Error::IncompleteLoad));
    assert_eq!(host.released.borrow().len(), 1);
    assert_eq!(loader.state(), LoadPhase::Failed(Error::IncompleteLoad));
}

#[tokio::test(start_paused = true)]
async fn callers_joining_a_failing_attempt_all_fail() {
    let loader = loader(FakeHost::default());

    let (a, b) = join!(loader.ensure_loaded("AIza"), loader.ensure_loaded("AIza"));

    assert_eq!(a, Err(Error::Timeout));
    assert_eq!(b, Err(Error::Timeout));
    assert_eq!(loader.host().injections(), 1);
}

#[tokio::test]
async fn empty_key_is_rejected_without_request() {
    let loader = loader(FakeHost::default());

    let outcome = loader.ensure_loaded("   ").await;

    assert!(matches!(outcome, Err(Error::InvalidInput(_))));
    assert_eq!(loader.host().injections(), 0);
    assert_eq!(loader.state(), LoadPhase::Unloaded);
}

#[tokio::test(start_paused = true)]
async fn finished_load_leaves_no_timer_behind() {
    let loader = loader(FakeHost::default());
    let host = loader.host();

    let (outcome, ()) = join!(loader.ensure_loaded("AIza"), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        host.present.set(true);
        host.fire_ready();
    });
    assert_eq!(outcome, Ok(()));

    tokio::time::advance(LOAD_TIMEOUT * 2).await;
    tokio::task::yield_now().await;

    assert_eq!(loader.state(), LoadPhase::Loaded);
    assert_eq!(host.released.borrow().len(), 1);
    assert_eq!(loader.attempts(), 1);
}

#[tokio::test(start_paused = true)]
async fn loaded_is_final_even_if_capability_disappears() {
    let loader = loader(FakeHost::default());
    let host = loader.host();

    let (first, ()) = join!(loader.ensure_loaded("AIza"), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        host.present.set(true);
        host.fire_ready();
    });
    first.unwrap();

    host.present.set(false);
    loader.ensure_loaded("AIza").await.unwrap();

    assert_eq!(loader.state(), LoadPhase::Loaded);
    assert_eq!(host.injections(), 1);
    assert_eq!(loader.attempts(), 1);
}
