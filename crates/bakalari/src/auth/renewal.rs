//! Background access-token renewal.
//!
//! One self-rescheduling task per session. It sleeps until shortly before the
//! token expires, refreshes, and goes back to sleep with the new lifetime. It
//! holds only a weak reference, so dropping every [`Session`](super::Session)
//! clone ends it as well as an explicit close.

use std::sync::Weak;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, debug_span, warn};

use crate::error::{Error, SessionError};

use super::session::SessionInner;

/// Handle to a running renewal loop.
pub(super) struct Renewal {
    stop: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl Renewal {
    pub(super) fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Signal the loop and wait for it to exit.
    pub(super) async fn stop(self) {
        // Err means the loop already exited and dropped its receiver
        let _ = self.stop.send(true);
        if let Err(e) = self.handle.await
            && e.is_panic()
        {
            warn!(error = %e, "Token renewal task panicked");
        }
    }
}

/// Spawn the renewal loop; the first refresh happens after `delay`.
pub(super) fn spawn(session: Weak<SessionInner>, delay: Duration) -> Renewal {
    let (stop, mut stopped) = watch::channel(false);

    let task = async move {
        let mut delay = delay;
        loop {
            tokio::select! {
                _ = stopped.changed() => break,
                _ = tokio::time::sleep(delay) => {}
            }

            let Some(inner) = session.upgrade() else {
                break;
            };

            let outcome = tokio::select! {
                _ = stopped.changed() => break,
                outcome = inner.refresh() => outcome,
            };

            match outcome {
                Ok(expires_in) => {
                    delay = inner.config.renewal_delay(expires_in);
                    debug!(?delay, "Next token renewal scheduled");
                }
                Err(e) if *stopped.borrow() || is_shutdown(&e) => {
                    debug!(error = %e, "Session closed during token renewal");
                    break;
                }
                Err(e) => {
                    // The stale token stays; callers will see the server's 401
                    warn!(error = %e, "Automatic token refresh failed, renewal stopped");
                    break;
                }
            }
        }
        debug!("Token renewal finished");
    };

    let handle = tokio::spawn(task.instrument(debug_span!("token_renewal")));
    Renewal { stop, handle }
}

/// Errors a refresh reports when the session was closed under it.
fn is_shutdown(err: &Error) -> bool {
    matches!(
        err,
        Error::Session(SessionError::NotConnected | SessionError::Closed)
    )
}
