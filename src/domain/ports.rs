use crate::domain::config::CheckoutConfig;
use crate::domain::result::{ApprovalPayload, FinishOutcome, StartOutcome};
use crate::domain::session::FlowKind;
use crate::domain::signal::RelaunchSignal;
use async_trait::async_trait;
use std::sync::Arc;

/// Boundary to the payment SDK's order-approval surface.
///
/// `start_authorization` either fails before the external surface is
/// presented or hands control to it and returns `Pending`.
/// `finish_from_relaunch` decodes the outcome carried by a relaunch signal;
/// the correlator calls it at most once per session.
#[async_trait]
pub trait AuthorizationClient: Send + Sync + 'static {
    type Params: Send + 'static;
    type Approval: ApprovalPayload;

    const KIND: FlowKind;

    async fn start_authorization(
        &self,
        order_id: &str,
        params: Self::Params,
    ) -> StartOutcome<Self::Approval>;

    fn finish_from_relaunch(&self, signal: &RelaunchSignal) -> FinishOutcome<Self::Approval>;
}

/// Read-only source of client credentials and target environment.
pub trait ConfigProvider: Send + Sync {
    fn checkout_config(&self) -> CheckoutConfig;
}

/// Tells the correlator whether a foreground surface exists to present the
/// authorization challenge on.
pub trait PresentationContext: Send + Sync {
    fn is_foreground_available(&self) -> bool;
}

pub type ConfigProviderArc = Arc<dyn ConfigProvider>;
pub type PresentationContextArc = Arc<dyn PresentationContext>;
