//! Resident lifecycle
//!
//! After registration the module has to stay resident so the host can keep
//! calling its bindings. [`Resident`] blocks on an unbuffered signal channel
//! until a [`ShutdownHandle`] fires or every handle is gone.

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TrySendError};
use std::time::Duration;

/// Why a resident wait ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// A handle called [`ShutdownHandle::shutdown`]
    Requested,
    /// Every handle was dropped without signalling
    HostGone,
}

/// Keeps the bridge resident until the host signals shutdown
#[derive(Debug)]
pub struct Resident {
    signal: Receiver<()>,
}

/// Host-side handle used to end a [`Resident`] wait
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    signal: Sender<()>,
}

impl Resident {
    /// Create a resident and the handle that releases it
    pub fn channel() -> (Self, ShutdownHandle) {
        // Rendezvous channel: a send only completes against a waiting receiver
        let (tx, rx) = bounded(0);
        (Self { signal: rx }, ShutdownHandle { signal: tx })
    }

    /// Block until the host signals shutdown
    pub fn run_until_shutdown(self) -> ShutdownReason {
        log::debug!("Bridge resident, waiting for shutdown signal");
        let reason = match self.signal.recv() {
            Ok(()) => ShutdownReason::Requested,
            Err(_) => ShutdownReason::HostGone,
        };
        log::debug!("Resident wait ended: {:?}", reason);
        reason
    }

    /// Like [`Resident::run_until_shutdown`], giving up after `timeout`
    ///
    /// Returns `None` if nothing was signalled in time.
    pub fn run_until_shutdown_timeout(self, timeout: Duration) -> Option<ShutdownReason> {
        match self.signal.recv_timeout(timeout) {
            Ok(()) => Some(ShutdownReason::Requested),
            Err(RecvTimeoutError::Disconnected) => Some(ShutdownReason::HostGone),
            Err(RecvTimeoutError::Timeout) => None,
        }
    }
}

impl ShutdownHandle {
    /// Signal the resident to stop
    ///
    /// Returns `true` if a waiter took the signal directly. If nobody is
    /// waiting yet the handle is dropped instead, which still releases the
    /// resident once the last handle is gone.
    pub fn shutdown(self) -> bool {
        match self.signal.try_send(()) {
            Ok(()) => true,
            Err(TrySendError::Full(())) | Err(TrySendError::Disconnected(())) => false,
        }
    }
}
