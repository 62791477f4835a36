use std::time::{Duration, Instant};

/// How long after a foreground resume the correlator waits for a relaunch
/// signal before declaring the checkout abandoned.
pub const GRACE_WINDOW: Duration = Duration::from_millis(2000);

/// Which flow variant created a session. Determines which authorization
/// operations are legal for it.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FlowKind {
    WebRedirect,
    CardAuthorization,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum SessionState {
    /// Session created, authorization started, the external surface may be
    /// showing.
    #[default]
    Pending,
    /// A matching relaunch signal has been claimed for this session.
    RelaunchObserved,
    Resolved,
}

/// One in-flight checkout attempt. Exclusively owned by the correlator and
/// dropped immediately after resolution.
#[derive(Debug, Clone)]
pub struct Session {
    pub order_id: String,
    pub kind: FlowKind,
    pub state: SessionState,
    pub created_at: Instant,
}

impl Session {
    pub fn new(order_id: impl Into<String>, kind: FlowKind) -> Self {
        Self {
            order_id: order_id.into(),
            kind,
            state: SessionState::Pending,
            created_at: Instant::now(),
        }
    }

    pub fn is_relaunch_observed(&self) -> bool {
        self.state == SessionState::RelaunchObserved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_pending() {
        let session = Session::new("ORDER1", FlowKind::WebRedirect);
        assert_eq!(session.order_id, "ORDER1");
        assert_eq!(session.state, SessionState::Pending);
        assert!(!session.is_relaunch_observed());
    }

    #[test]
    fn test_relaunch_observed_flag() {
        let mut session = Session::new("ORDER1", FlowKind::CardAuthorization);
        session.state = SessionState::RelaunchObserved;
        assert!(session.is_relaunch_observed());
    }
}
