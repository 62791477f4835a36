use crate::application::channel::{ResultChannel, Subscriber};
use crate::application::watchdog::Watchdog;
use crate::domain::ports::{
    AuthorizationClient, ConfigProviderArc, PresentationContextArc,
};
use crate::domain::result::{ApprovalPayload, CheckoutResult, FinishOutcome, StartOutcome};
use crate::domain::session::{GRACE_WINDOW, Session, SessionState};
use crate::domain::signal::RelaunchSignal;
use crate::error::{CheckoutError, Result};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, warn};

/// One session owned by the correlator, together with the primitives that
/// can resolve it.
struct ActiveSession<P> {
    session: Session,
    channel: ResultChannel<P>,
    watchdog: Watchdog,
    generation: u64,
}

struct Inner<P> {
    /// Bumped on every `initiate`; callbacks scheduled against a superseded
    /// session fail this check and are suppressed.
    generation: u64,
    active: Option<ActiveSession<P>>,
    /// Callback registered ahead of the next `initiate`.
    pending_subscriber: Option<Subscriber<P>>,
}

/// Owns the lifecycle of one in-flight checkout session and arbitrates
/// between the competing completion signals: the client's immediate start
/// outcome, the deep-link relaunch, and the abandonment watchdog.
///
/// Every path that resolves the session funnels through one take-and-deliver
/// step under a single lock, so exactly one terminal event reaches the
/// session's [`ResultChannel`] no matter how the signals race.
pub struct SessionCorrelator<A: AuthorizationClient> {
    client: Arc<A>,
    config: ConfigProviderArc,
    presentation: PresentationContextArc,
    inner: Arc<Mutex<Inner<A::Approval>>>,
}

impl<A: AuthorizationClient> SessionCorrelator<A> {
    pub fn new(
        client: Arc<A>,
        config: ConfigProviderArc,
        presentation: PresentationContextArc,
    ) -> Self {
        Self {
            client,
            config,
            presentation,
            inner: Arc::new(Mutex::new(Inner {
                generation: 0,
                active: None,
                pending_subscriber: None,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<A::Approval>> {
        self.inner.lock().expect("correlator state poisoned")
    }

    /// Registers the callback that receives the terminal event of the next
    /// `initiate` call. A later call replaces the earlier one.
    pub fn subscribe<F>(&self, callback: F)
    where
        F: FnOnce(CheckoutResult<A::Approval>) + Send + 'static,
    {
        self.lock().pending_subscriber = Some(Box::new(callback));
    }

    /// Starts a checkout for `order_id`, superseding any unresolved session.
    ///
    /// The superseded session's watchdog is disarmed and its channel closed
    /// without emitting. Fails synchronously only when no foreground surface
    /// is available; every other failure arrives through the result channel.
    pub async fn initiate(&self, order_id: impl Into<String>, params: A::Params) -> Result<()> {
        let order_id = order_id.into();
        if !self.presentation.is_foreground_available() {
            return Err(CheckoutError::ActivityUnavailable);
        }
        let config = self.config.checkout_config();

        let generation = {
            let mut inner = self.lock();
            if let Some(mut old) = inner.active.take() {
                warn!(
                    order_id = %old.session.order_id,
                    "superseding unresolved session, no event will be emitted for it"
                );
                old.watchdog.disarm();
                old.channel.close();
            }
            inner.generation += 1;

            let channel = ResultChannel::new();
            if let Some(callback) = inner.pending_subscriber.take() {
                channel.subscribe(callback);
            }

            if config.client_id.is_none() {
                debug!(order_id = %order_id, "initiate without credentials");
                drop(inner);
                channel.deliver(CheckoutResult::Error {
                    message: "SDK not initialized".to_string(),
                });
                return Ok(());
            }

            inner.active = Some(ActiveSession {
                session: Session::new(order_id.clone(), A::KIND),
                channel,
                watchdog: Watchdog::new(),
                generation: inner.generation,
            });
            inner.generation
        };

        debug!(order_id = %order_id, kind = ?A::KIND, "starting authorization");
        match self.client.start_authorization(&order_id, params).await {
            StartOutcome::Pending => Ok(()),
            StartOutcome::Failure(details) => {
                self.resolve_for(
                    generation,
                    CheckoutResult::Failure(details.or_order_id(&order_id)),
                );
                Ok(())
            }
            StartOutcome::Success(approval) => {
                self.resolve_for(generation, CheckoutResult::Success(approval));
                Ok(())
            }
        }
    }

    /// Offers a relaunch signal to the current session.
    ///
    /// Returns `false` when no session is pending or the scheme does not
    /// match the configured return scheme, so the caller can route the
    /// signal to another handler. Returns `true` once the signal is claimed;
    /// the session resolves before this method returns.
    pub fn on_relaunch(&self, signal: &RelaunchSignal) -> bool {
        let expected_scheme = self.config.checkout_config().return_scheme;

        let (order_id, generation) = {
            let mut inner = self.lock();
            let Some(active) = inner.active.as_mut() else {
                return false;
            };
            if active.session.state != SessionState::Pending {
                return false;
            }
            if signal.scheme() != expected_scheme {
                debug!(scheme = signal.scheme(), "relaunch scheme not ours, ignoring");
                return false;
            }
            active.session.state = SessionState::RelaunchObserved;
            (active.session.order_id.clone(), active.generation)
        };

        // The client is invoked outside the lock; marking the session
        // RelaunchObserved above keeps finish_from_relaunch at one call per
        // session even if another relaunch races in.
        let result = match self.client.finish_from_relaunch(signal) {
            FinishOutcome::Canceled => CheckoutResult::Canceled {
                order_id: Some(order_id.clone()),
            },
            FinishOutcome::Failure(details) => {
                CheckoutResult::Failure(details.or_order_id(&order_id))
            }
            FinishOutcome::NoResult => {
                match A::Approval::from_relaunch_fallback(&order_id, signal) {
                    Some(approval) => CheckoutResult::Success(approval),
                    None => CheckoutResult::Error {
                        message: "unable to process request".to_string(),
                    },
                }
            }
            FinishOutcome::Success(approval) => CheckoutResult::Success(approval),
        };

        self.resolve_for(generation, result);
        true
    }

    /// Called when the application regains foreground. Arms the abandonment
    /// watchdog for a pending session with a live subscriber; when it fires
    /// without a relaunch having been observed, the session resolves as
    /// `Canceled`.
    pub fn on_foreground_resumed(&self) {
        let mut inner = self.lock();
        let Some(active) = inner.active.as_mut() else {
            return;
        };
        if active.session.state != SessionState::Pending || !active.channel.is_subscribed() {
            return;
        }

        let order_id = active.session.order_id.clone();
        let generation = active.generation;
        let shared = Arc::clone(&self.inner);
        debug!(order_id = %order_id, "foreground resumed, arming abandonment watchdog");
        active.watchdog.arm(GRACE_WINDOW, move || {
            let taken = {
                let mut inner = shared.lock().expect("correlator state poisoned");
                let still_pending = matches!(
                    &inner.active,
                    Some(active)
                        if active.generation == generation
                            && active.session.state == SessionState::Pending
                );
                if still_pending { inner.active.take() } else { None }
            };
            if let Some(active) = taken {
                debug!(order_id = %order_id, "grace window elapsed, checkout abandoned");
                finish(
                    active,
                    CheckoutResult::Canceled {
                        order_id: Some(order_id),
                    },
                );
            }
        });
    }

    /// True while a session is awaiting resolution.
    pub fn has_active_session(&self) -> bool {
        self.lock().active.is_some()
    }

    /// Resolves the current session if it still belongs to `generation`.
    fn resolve_for(&self, generation: u64, result: CheckoutResult<A::Approval>) {
        let taken = {
            let mut inner = self.lock();
            let current = matches!(&inner.active, Some(active) if active.generation == generation);
            if current { inner.active.take() } else { None }
        };
        if let Some(active) = taken {
            finish(active, result);
        }
    }
}

/// Terminal step shared by every resolution path: disarm the watchdog and
/// deliver exactly one event, outside the correlator lock.
fn finish<P: ApprovalPayload>(mut active: ActiveSession<P>, result: CheckoutResult<P>) {
    active.watchdog.disarm();
    active.session.state = SessionState::Resolved;
    debug!(
        order_id = %active.session.order_id,
        elapsed = ?active.session.created_at.elapsed(),
        "session resolved"
    );
    active.channel.deliver(result);
}
