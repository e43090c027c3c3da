//! Completion blocks.
//!
//! [`Finally`] is an RAII guard: the action registered on creation runs when the
//! guard is dropped, so it executes on normal return, on `?` propagation and
//! while unwinding from a panic.

/// RAII guard that runs a completion action exactly once.
pub struct Finally<F: FnOnce()> {
    action: Option<F>,
}

impl<F: FnOnce()> Finally<F> {
    /// Registers `action` to run when the guard goes out of scope.
    pub fn new(action: F) -> Self {
        Self {
            action: Some(action),
        }
    }
}

impl<F: FnOnce()> Drop for Finally<F> {
    fn drop(&mut self) {
        if let Some(action) = self.action.take() {
            action();
        }
    }
}

/// Runs `body` as a protected region followed by `completion`.
///
/// `completion` runs whatever `body` returns, including an `Err`.
pub fn protect<T>(completion: impl FnOnce(), body: impl FnOnce() -> T) -> T {
    let _guard = Finally::new(completion);
    body()
}
