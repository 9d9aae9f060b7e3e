use std::future::Future;
use std::time::Duration;

/// Timer collaborator.
///
/// All engine suspension points go through this trait: poll intervals, the
/// fixed post-hover pauses, and the single animation-frame wait before the
/// close sequence. Futures are not required to be `Send`; the engine runs on
/// one cooperative thread.
pub trait Clock {
    /// Monotonic-enough time since an arbitrary origin.
    fn now(&self) -> Duration;

    /// Resolve after `duration` has elapsed.
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;

    /// Resolve after the host has rendered the next frame.
    fn next_frame(&self) -> impl Future<Output = ()>;
}
