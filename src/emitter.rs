//! Minimal synchronous publish/subscribe primitive.

use crate::config::EMITTER_MODULE;
use crate::report::Reporter;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

/// Shared listener closure.
pub type Listener<P> = Rc<dyn Fn(&P)>;

/// Raised when an event is emitted before anyone ever listened for it.
#[derive(Debug, Clone, PartialEq)]
pub struct EmitError {
    pub event: String,
    pub payload: String,
}

impl fmt::Display for EmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EmitError: no listeners registered for event `{}` (payload: {})",
            self.event, self.payload
        )
    }
}

impl std::error::Error for EmitError {}

/// Ordered listener lists keyed by a closed set of event names.
///
/// Listeners run in registration order. There is no `off`; removal is layered
/// on top by [`crate::subscription::Subscriptions`].
pub struct EventEmitter<K, P> {
    listeners: RefCell<HashMap<K, Vec<Listener<P>>>>,
    reporter: Rc<dyn Reporter>,
}

impl<K, P> EventEmitter<K, P>
where
    K: Copy + Eq + Hash + fmt::Display,
    P: fmt::Debug,
{
    pub fn new(reporter: Rc<dyn Reporter>) -> Self {
        Self {
            listeners: RefCell::new(HashMap::new()),
            reporter,
        }
    }

    /// Append `listener` to the list for `event`. Returns `self` for chaining.
    pub fn on<F>(&self, event: K, listener: F) -> &Self
    where
        F: Fn(&P) + 'static,
    {
        self.on_shared(event, Rc::new(listener))
    }

    /// Same as [`EventEmitter::on`] for an already shared listener.
    pub fn on_shared(&self, event: K, listener: Listener<P>) -> &Self {
        self.listeners
            .borrow_mut()
            .entry(event)
            .or_default()
            .push(listener);
        self
    }

    /// Call every listener of `event` in order.
    ///
    /// The list is copied before dispatch so listeners are free to register new
    /// listeners or re-enter the owner of this emitter. A failing listener is
    /// not caught; the remaining listeners are skipped.
    pub fn emit(&self, event: K, payload: &P) {
        let snapshot: Option<Vec<Listener<P>>> = self.listeners.borrow().get(&event).cloned();

        let Some(listeners) = snapshot else {
            let err = EmitError {
                event: event.to_string(),
                payload: format!("{:?}", payload),
            };
            self.reporter.error(EMITTER_MODULE, &err);
            return;
        };

        for listener in listeners {
            listener(payload);
        }
    }

    pub fn listener_count(&self, event: K) -> usize {
        self.listeners.borrow().get(&event).map_or(0, Vec::len)
    }
}

impl<K, P> fmt::Debug for EventEmitter<K, P>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listeners = self.listeners.borrow();
        let counts: Vec<(&K, usize)> = listeners.iter().map(|(k, v)| (k, v.len())).collect();
        f.debug_struct("EventEmitter").field("listeners", &counts).finish()
    }
}
