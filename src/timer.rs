//! `Clock` backed by browser timers and `requestAnimationFrame`.

use std::future::Future;
use std::time::Duration;

use engine::clock::Clock;
use futures::channel::oneshot;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

/// Wall-clock time and timers of the current window.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now(&self) -> Duration {
        Duration::from_secs_f64(js_sys::Date::now().max(0.0) / 1000.0)
    }

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        gloo_timers::future::sleep(duration)
    }

    fn next_frame(&self) -> impl Future<Output = ()> {
        let (tx, rx) = oneshot::channel::<()>();
        let callback = Closure::once(move |_ts: f64| {
            if tx.send(()).is_err() {
                log::trace!("frame waiter went away");
            }
        });
        let scheduled = web_sys::window()
            .is_some_and(|window| window.request_animation_frame(callback.as_ref().unchecked_ref()).is_ok());

        async move {
            if !scheduled {
                log::debug!("requestAnimationFrame unavailable; not waiting for a frame");
                return;
            }
            // The callback must outlive the frame request.
            let _callback = callback;
            if rx.await.is_err() {
                log::trace!("frame callback dropped");
            }
        }
    }
}
