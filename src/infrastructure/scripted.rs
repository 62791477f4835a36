use crate::domain::config::{CardCheckoutParams, WebCheckoutParams};
use crate::domain::ports::AuthorizationClient;
use crate::domain::result::{CardApproval, FinishOutcome, StartOutcome, WebApproval};
use crate::domain::session::FlowKind;
use crate::domain::signal::RelaunchSignal;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Queue-programmable authorization client used by tests and the scenario
/// runner. Unprogrammed starts report `Pending`, unprogrammed finishes
/// report `NoResult`.
#[derive(Default)]
pub struct ScriptedWebClient {
    starts: Mutex<VecDeque<StartOutcome<WebApproval>>>,
    finishes: Mutex<VecDeque<FinishOutcome<WebApproval>>>,
    start_calls: AtomicUsize,
    finish_calls: AtomicUsize,
}

impl ScriptedWebClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_start(&self, outcome: StartOutcome<WebApproval>) {
        self.starts.lock().expect("script poisoned").push_back(outcome);
    }

    pub fn push_finish(&self, outcome: FinishOutcome<WebApproval>) {
        self.finishes
            .lock()
            .expect("script poisoned")
            .push_back(outcome);
    }

    pub fn start_calls(&self) -> usize {
        self.start_calls.load(Ordering::SeqCst)
    }

    pub fn finish_calls(&self) -> usize {
        self.finish_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthorizationClient for ScriptedWebClient {
    type Params = WebCheckoutParams;
    type Approval = WebApproval;

    const KIND: FlowKind = FlowKind::WebRedirect;

    async fn start_authorization(
        &self,
        _order_id: &str,
        _params: WebCheckoutParams,
    ) -> StartOutcome<WebApproval> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        self.starts
            .lock()
            .expect("script poisoned")
            .pop_front()
            .unwrap_or(StartOutcome::Pending)
    }

    fn finish_from_relaunch(&self, _signal: &RelaunchSignal) -> FinishOutcome<WebApproval> {
        self.finish_calls.fetch_add(1, Ordering::SeqCst);
        self.finishes
            .lock()
            .expect("script poisoned")
            .pop_front()
            .unwrap_or(FinishOutcome::NoResult)
    }
}

/// Card-flow counterpart of [`ScriptedWebClient`].
#[derive(Default)]
pub struct ScriptedCardClient {
    starts: Mutex<VecDeque<StartOutcome<CardApproval>>>,
    finishes: Mutex<VecDeque<FinishOutcome<CardApproval>>>,
    start_calls: AtomicUsize,
    finish_calls: AtomicUsize,
}

impl ScriptedCardClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_start(&self, outcome: StartOutcome<CardApproval>) {
        self.starts.lock().expect("script poisoned").push_back(outcome);
    }

    pub fn push_finish(&self, outcome: FinishOutcome<CardApproval>) {
        self.finishes
            .lock()
            .expect("script poisoned")
            .push_back(outcome);
    }

    pub fn start_calls(&self) -> usize {
        self.start_calls.load(Ordering::SeqCst)
    }

    pub fn finish_calls(&self) -> usize {
        self.finish_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthorizationClient for ScriptedCardClient {
    type Params = CardCheckoutParams;
    type Approval = CardApproval;

    const KIND: FlowKind = FlowKind::CardAuthorization;

    async fn start_authorization(
        &self,
        _order_id: &str,
        _params: CardCheckoutParams,
    ) -> StartOutcome<CardApproval> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        self.starts
            .lock()
            .expect("script poisoned")
            .pop_front()
            .unwrap_or(StartOutcome::Pending)
    }

    fn finish_from_relaunch(&self, _signal: &RelaunchSignal) -> FinishOutcome<CardApproval> {
        self.finish_calls.fetch_add(1, Ordering::SeqCst);
        self.finishes
            .lock()
            .expect("script poisoned")
            .pop_front()
            .unwrap_or(FinishOutcome::NoResult)
    }
}
