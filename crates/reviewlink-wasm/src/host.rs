// crates/reviewlink-wasm/src/host.rs

//! DOM implementations of the loader seams.

use futures::channel::oneshot;
use futures::future;
use js_sys::Reflect;
use reviewlink_core::loader::{
    ReadyHook, ScriptHost, ScriptRequest, SleepFuture, Timer, TransportFuture,
};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

use crate::js_message;

/// Closures and element belonging to one load attempt. Dropping it
/// invalidates the JS callbacks, so it lives until `release`.
struct Attempt {
    script: HtmlScriptElement,
    _ready: Closure<dyn FnMut()>,
    _onload: Closure<dyn FnMut()>,
    _onerror: Closure<dyn FnMut(web_sys::Event)>,
}

#[derive(Default)]
pub struct BrowserHost {
    attempts: RefCell<HashMap<String, Attempt>>,
}

impl BrowserHost {
    fn try_inject(
        &self,
        window: &Window,
        request: &ScriptRequest,
        hook: ReadyHook,
    ) -> Result<oneshot::Receiver<Result<(), String>>, JsValue> {
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let script: HtmlScriptElement = document.create_element("script")?.dyn_into()?;
        script.set_src(request.url());
        script.set_async(true);

        let hook = RefCell::new(Some(hook));
        let ready = Closure::<dyn FnMut()>::new(move || {
            if let Some(hook) = hook.borrow_mut().take() {
                hook.fire();
            }
        });
        Reflect::set(
            window,
            &JsValue::from_str(request.callback_name()),
            ready.as_ref().unchecked_ref(),
        )?;

        let (tx, rx) = oneshot::channel();
        let tx = Rc::new(RefCell::new(Some(tx)));
        let onload = Closure::<dyn FnMut()>::new({
            let tx = Rc::clone(&tx);
            move || {
                if let Some(tx) = tx.borrow_mut().take() {
                    let _ = tx.send(Ok(()));
                }
            }
        });
        let onerror = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
            if let Some(tx) = tx.borrow_mut().take() {
                let _ = tx.send(Err("the maps script could not be fetched".to_string()));
            }
        });
        script.set_onload(Some(onload.as_ref().unchecked_ref()));
        script.set_onerror(Some(onerror.as_ref().unchecked_ref()));

        let head = document
            .head()
            .ok_or_else(|| JsValue::from_str("document has no <head>"))?;
        head.append_child(&script)?;

        self.attempts.borrow_mut().insert(
            request.callback_name().to_string(),
            Attempt {
                script,
                _ready: ready,
                _onload: onload,
                _onerror: onerror,
            },
        );
        Ok(rx)
    }
}

impl ScriptHost for BrowserHost {
    fn probe(&self) -> bool {
        let Some(window) = web_sys::window() else {
            return false;
        };
        ["google", "maps", "places"]
            .iter()
            .try_fold(JsValue::from(window), |obj, key| {
                Reflect::get(&obj, &JsValue::from_str(key))
                    .ok()
                    .filter(|v| !v.is_undefined() && !v.is_null())
            })
            .is_some()
    }

    fn inject(&self, request: &ScriptRequest, hook: ReadyHook) -> TransportFuture {
        let Some(window) = web_sys::window() else {
            return Box::pin(future::ready(Err("no window object".to_string())));
        };
        match self.try_inject(&window, request, hook) {
            Ok(rx) => Box::pin(async move {
                rx.await
                    .unwrap_or_else(|_| Err("the script element was released".to_string()))
            }),
            Err(e) => {
                let reason = js_message(&e);
                Box::pin(future::ready(Err(reason)))
            }
        }
    }

    fn release(&self, request: &ScriptRequest) {
        if let Some(window) = web_sys::window() {
            let _ = Reflect::delete_property(&window, &JsValue::from_str(request.callback_name()));
        }
        let Some(attempt) = self.attempts.borrow_mut().remove(request.callback_name()) else {
            return;
        };
        attempt.script.set_onload(None);
        attempt.script.set_onerror(None);
        // A failed script has nothing left to run; keep the page clean for the retry.
        if !self.probe() {
            attempt.script.remove();
        }
    }
}

/// Pending `setTimeout`; cleared when dropped before it fires.
struct TimeoutGuard {
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

impl Drop for TimeoutGuard {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_timeout_with_handle(self.handle);
        }
    }
}

pub struct BrowserTimer;

impl Timer for BrowserTimer {
    fn sleep(&self, duration: Duration) -> SleepFuture {
        let (tx, rx) = oneshot::channel::<()>();
        let mut tx = Some(tx);
        let callback = Closure::<dyn FnMut()>::new(move || {
            if let Some(tx) = tx.take() {
                let _ = tx.send(());
            }
        });

        let millis = i32::try_from(duration.as_millis()).unwrap_or(i32::MAX);
        let handle = web_sys::window().map(|w| {
            w.set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                millis,
            )
        });
        match handle {
            Some(Ok(handle)) => {
                let guard = TimeoutGuard {
                    handle,
                    _callback: callback,
                };
                Box::pin(async move {
                    let _guard = guard;
                    let _ = rx.await;
                })
            }
            _ => {
                tracing::warn!("setTimeout unavailable; treating the wait as elapsed");
                Box::pin(future::ready(()))
            }
        }
    }
}
