//! Tokio runtime shared by the steps of one behavioural scenario.

use std::cell::RefCell;
use std::future::Future;
use std::io;
use std::rc::Rc;

use rstest_bdd::Slot;
use tokio::runtime::{Builder, Runtime};
use wiremock::MockServer;

/// Runtime handle that can be stored in an `rstest-bdd` Slot.
///
/// Widget fetches are spawned onto this runtime, so every step that touches
/// the widget must run inside [`SharedRuntime::block_on`].
#[derive(Clone)]
pub struct SharedRuntime(Rc<RefCell<Runtime>>);

impl SharedRuntime {
    /// Builds a multi-threaded runtime with timers and I/O enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime cannot be created.
    pub fn build() -> io::Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;
        Ok(Self(Rc::new(RefCell::new(runtime))))
    }

    /// Runs `future` to completion on the shared runtime.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.0.borrow().block_on(future)
    }
}

/// Ensures the scenario's runtime and mock review backend are started.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created or the slot stays empty
/// after being filled.
pub fn ensure_runtime_and_server(
    runtime: &Slot<SharedRuntime>,
    server: &Slot<MockServer>,
) -> io::Result<SharedRuntime> {
    if runtime.with_ref(|_| ()).is_none() {
        runtime.set(SharedRuntime::build()?);
    }

    let shared_runtime = runtime
        .get()
        .ok_or_else(|| io::Error::other("runtime not initialised after set"))?;

    if server.with_ref(|_| ()).is_none() {
        server.set(shared_runtime.block_on(MockServer::start()));
    }

    Ok(shared_runtime)
}
