use crate::domain::signal::RelaunchSignal;
use serde::Serialize;
use std::fmt;

/// Structured failure reported by the payment SDK.
#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FailureDetails {
    pub order_id: Option<String>,
    pub reason: String,
    pub code: i64,
    pub correlation_id: Option<String>,
}

impl FailureDetails {
    /// Fills the order id from the session when the SDK did not report one.
    pub fn or_order_id(mut self, order_id: &str) -> Self {
        if self.order_id.is_none() {
            self.order_id = Some(order_id.to_string());
        }
        self
    }
}

/// Immediate outcome of asking the authorization client to start.
///
/// `Pending` is the common case: the external surface is now showing and the
/// session resolves later through a relaunch or the watchdog.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum StartOutcome<P> {
    Pending,
    Success(P),
    Failure(FailureDetails),
}

/// Outcome of handing a relaunch signal back to the authorization client.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum FinishOutcome<P> {
    Canceled,
    Failure(FailureDetails),
    /// The client could not decode an outcome from the signal.
    NoResult,
    Success(P),
}

/// The single terminal event produced per session.
#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum CheckoutResult<P> {
    Success(P),
    Failure(FailureDetails),
    #[serde(rename_all = "camelCase")]
    Canceled { order_id: Option<String> },
    /// Protocol or integration failure, not a business outcome.
    Error { message: String },
}

/// Flow-specific success payload carried by [`CheckoutResult::Success`].
///
/// `from_relaunch_fallback` is consulted when the client reports
/// [`FinishOutcome::NoResult`]: the web flow recovers an approval from the
/// relaunch query parameters, the card flow reports an indeterminate "No
/// Result" approval for the session's own order.
pub trait ApprovalPayload: Clone + fmt::Debug + Send + Serialize + 'static {
    fn order_id(&self) -> Option<&str>;

    fn from_relaunch_fallback(session_order_id: &str, signal: &RelaunchSignal) -> Option<Self>;
}

/// Approval reported by the web-redirect flow.
#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WebApproval {
    pub order_id: Option<String>,
    pub payer_id: Option<String>,
}

impl ApprovalPayload for WebApproval {
    fn order_id(&self) -> Option<&str> {
        self.order_id.as_deref()
    }

    fn from_relaunch_fallback(_session_order_id: &str, signal: &RelaunchSignal) -> Option<Self> {
        // The approval token doubles as the order id on the return URI.
        let token = signal.query_param("token")?;
        Some(Self {
            order_id: Some(token),
            payer_id: signal.query_param("PayerID"),
        })
    }
}

/// Approval reported by the card-authorization flow.
#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CardApproval {
    pub order_id: Option<String>,
    pub status: Option<String>,
    pub did_attempt_three_d_secure: bool,
}

impl ApprovalPayload for CardApproval {
    fn order_id(&self) -> Option<&str> {
        self.order_id.as_deref()
    }

    fn from_relaunch_fallback(session_order_id: &str, _signal: &RelaunchSignal) -> Option<Self> {
        Some(Self {
            order_id: Some(session_order_id.to_string()),
            status: Some("No Result".to_string()),
            did_attempt_three_d_secure: false,
        })
    }
}
