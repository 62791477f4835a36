use crate::domain::result::CheckoutResult;
use std::sync::Mutex;

pub type Subscriber<P> = Box<dyn FnOnce(CheckoutResult<P>) + Send>;

enum ChannelState<P> {
    Open { subscriber: Option<Subscriber<P>> },
    Closed,
}

/// Single-subscriber, at-most-one-event notification primitive. One instance
/// exists per session.
///
/// A later `subscribe` replaces the previous callback (last listener wins).
/// `deliver` invokes the current callback if one is attached and then closes
/// the channel; without a subscriber the event is dropped, not buffered.
pub struct ResultChannel<P> {
    state: Mutex<ChannelState<P>>,
}

impl<P> ResultChannel<P> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ChannelState::Open { subscriber: None }),
        }
    }

    pub fn subscribe(&self, callback: Subscriber<P>) {
        let mut state = self.state.lock().expect("channel state poisoned");
        if let ChannelState::Open { subscriber } = &mut *state {
            *subscriber = Some(callback);
        }
    }

    /// Delivers the terminal event and closes the channel. A second call is
    /// a no-op.
    pub fn deliver(&self, result: CheckoutResult<P>) {
        let callback = {
            let mut state = self.state.lock().expect("channel state poisoned");
            match std::mem::replace(&mut *state, ChannelState::Closed) {
                ChannelState::Open { subscriber } => subscriber,
                ChannelState::Closed => return,
            }
        };
        match callback {
            // Invoked outside the lock: the callback belongs to the caller.
            Some(callback) => callback(result),
            None => tracing::debug!("terminal event dropped, no subscriber attached"),
        }
    }

    /// Tears the channel down without emitting.
    pub fn close(&self) {
        let mut state = self.state.lock().expect("channel state poisoned");
        *state = ChannelState::Closed;
    }

    pub fn is_subscribed(&self) -> bool {
        let state = self.state.lock().expect("channel state poisoned");
        matches!(&*state, ChannelState::Open { subscriber: Some(_) })
    }

    pub fn is_closed(&self) -> bool {
        let state = self.state.lock().expect("channel state poisoned");
        matches!(&*state, ChannelState::Closed)
    }
}

impl<P> Default for ResultChannel<P> {
    fn default() -> Self {
        Self::new()
    }
}
