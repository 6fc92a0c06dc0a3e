//! Fan-out of gateway events to subscribed listeners.
//!
//! The dispatcher is filled during bootstrap and frozen behind an `Arc`
//! before login. The only state that changes afterwards is the fired flag
//! of each once-listener.

use crate::{EventHandler, EventKind, EventListener, Platform};
use futures::FutureExt;
use futures::future::join_all;
use octa_error::{DispatchError, DispatchErrorKind, HandlerResult};
use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error, instrument, trace};

struct Subscription<P: Platform> {
    kind: EventKind,
    handler: EventHandler<P>,
    once: bool,
    fired: AtomicBool,
    label: String,
}

impl<P: Platform> Subscription<P> {
    /// Claim the right to run. Once-listeners can be claimed a single time.
    fn claim(&self) -> bool {
        !self.once || !self.fired.swap(true, Ordering::AcqRel)
    }
}

/// Subscription table attached to the client.
///
/// Every subscription runs independently. The listeners of one event are
/// started in attachment order and then awaited together, so a listener
/// that never finishes does not hold back the others.
///
/// # Failure policy
///
/// With `catch_errors` enabled, a failing or panicking listener is logged
/// and dispatch succeeds. Otherwise every listener still runs and the first
/// failure, in attachment order, is returned to the caller.
pub struct Dispatcher<P: Platform> {
    subscriptions: Vec<Subscription<P>>,
    catch_errors: bool,
}

impl<P: Platform> Dispatcher<P> {
    /// Empty dispatcher.
    pub fn new(catch_errors: bool) -> Self {
        Self {
            subscriptions: Vec::new(),
            catch_errors,
        }
    }

    /// Subscribe a listener. Listeners start in attachment order.
    pub fn attach(&mut self, listener: EventListener<P>) {
        let (kind, handler, once, label) = listener.into_parts();
        debug!(%kind, once, label = %label, "Attaching listener");
        self.subscriptions.push(Subscription {
            kind,
            handler,
            once,
            fired: AtomicBool::new(false),
            label,
        });
    }

    /// Whether handler failures are swallowed after logging.
    pub fn catch_errors(&self) -> bool {
        self.catch_errors
    }

    /// Number of subscriptions.
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    /// True when nothing is subscribed.
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Number of subscriptions for one event kind.
    pub fn count(&self, kind: EventKind) -> usize {
        self.subscriptions.iter().filter(|sub| sub.kind == kind).count()
    }

    /// Deliver an event to every matching listener.
    ///
    /// # Errors
    ///
    /// Returns the first listener failure when `catch_errors` is disabled.
    #[instrument(skip_all, fields(event = tracing::field::Empty))]
    pub async fn dispatch(&self, client: P::Client, event: P::Event) -> Result<(), DispatchError> {
        let kind = P::event_kind(&event);
        tracing::Span::current().record("event", tracing::field::display(kind));

        let mut runs = Vec::new();
        for subscription in self.subscriptions.iter().filter(|sub| sub.kind == kind) {
            if !subscription.claim() {
                trace!(label = %subscription.label, "Once-listener already fired");
                continue;
            }
            runs.push(run_handler::<P>(
                &subscription.handler,
                &subscription.label,
                client.clone(),
                event.clone(),
            ));
        }

        let mut first = None;
        for failure in join_all(runs).await.into_iter().filter_map(Result::err) {
            let err = DispatchError::new(failure);
            if self.catch_errors || first.is_some() {
                error!(error = %err, "Listener failed");
            } else {
                first = Some(err);
            }
        }

        first.map_or(Ok(()), Err)
    }
}

async fn run_handler<P: Platform>(
    handler: &EventHandler<P>,
    label: &str,
    client: P::Client,
    event: P::Event,
) -> Result<(), DispatchErrorKind> {
    let label = label.to_string();

    let future = match std::panic::catch_unwind(AssertUnwindSafe(|| handler(client, event))) {
        Ok(future) => future,
        Err(payload) => return Err(panicked(label, payload)),
    };

    let result: HandlerResult = match AssertUnwindSafe(future).catch_unwind().await {
        Ok(result) => result,
        Err(payload) => return Err(panicked(label, payload)),
    };

    result.map_err(|e| DispatchErrorKind::HandlerFailed {
        event: label,
        reason: e.to_string(),
    })
}

fn panicked(event: String, payload: Box<dyn Any + Send>) -> DispatchErrorKind {
    let reason = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string());
    DispatchErrorKind::HandlerPanicked { event, reason }
}

impl<P: Platform> fmt::Debug for Dispatcher<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<_> = self.subscriptions.iter().map(|sub| &sub.label).collect();
        f.debug_struct("Dispatcher")
            .field("catch_errors", &self.catch_errors)
            .field("subscriptions", &labels)
            .finish()
    }
}
