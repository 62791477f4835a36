use crate::domain::result::{FailureDetails, FinishOutcome, StartOutcome, WebApproval};
use crate::error::{CheckoutError, Result};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub enum ScenarioOp {
    /// Programs the scripted client's next start outcome.
    ScriptStart,
    /// Programs the scripted client's next finish outcome.
    ScriptFinish,
    Initiate,
    Relaunch,
    Resume,
    Wait,
}

/// One row of a scenario CSV (`op, order, value`).
#[derive(Debug, Deserialize, Clone)]
pub struct ScenarioStep {
    pub op: ScenarioOp,
    pub order: Option<String>,
    pub value: Option<String>,
}

impl ScenarioStep {
    pub fn require_value(&self) -> Result<&str> {
        self.value
            .as_deref()
            .filter(|value| !value.is_empty())
            .ok_or_else(|| CheckoutError::Scenario(format!("{:?} step needs a value", self.op)))
    }
}

pub struct ScenarioReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ScenarioReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    pub fn steps(self) -> impl Iterator<Item = Result<ScenarioStep>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(CheckoutError::from))
    }
}

/// Parses a `scriptStart` value: `pending`, `failure:<code>:<reason>` or
/// `success:<orderId>:<payerId>`.
pub fn parse_start_outcome(value: &str) -> Result<StartOutcome<WebApproval>> {
    match value.split(':').collect::<Vec<_>>().as_slice() {
        ["pending"] => Ok(StartOutcome::Pending),
        ["failure", code, reason] => Ok(StartOutcome::Failure(failure_details(code, reason)?)),
        ["success", order_id, payer_id] => Ok(StartOutcome::Success(approval(order_id, payer_id))),
        _ => Err(CheckoutError::Scenario(format!(
            "unrecognized start outcome {value:?}"
        ))),
    }
}

/// Parses a `scriptFinish` value: `canceled`, `noResult`,
/// `failure:<code>:<reason>` or `success:<orderId>:<payerId>`.
pub fn parse_finish_outcome(value: &str) -> Result<FinishOutcome<WebApproval>> {
    match value.split(':').collect::<Vec<_>>().as_slice() {
        ["canceled"] => Ok(FinishOutcome::Canceled),
        ["noResult"] => Ok(FinishOutcome::NoResult),
        ["failure", code, reason] => Ok(FinishOutcome::Failure(failure_details(code, reason)?)),
        ["success", order_id, payer_id] => Ok(FinishOutcome::Success(approval(order_id, payer_id))),
        _ => Err(CheckoutError::Scenario(format!(
            "unrecognized finish outcome {value:?}"
        ))),
    }
}

fn failure_details(code: &str, reason: &str) -> Result<FailureDetails> {
    let code = code
        .parse()
        .map_err(|_| CheckoutError::Scenario(format!("bad failure code {code:?}")))?;
    Ok(FailureDetails {
        order_id: None,
        reason: reason.to_string(),
        code,
        correlation_id: None,
    })
}

fn approval(order_id: &str, payer_id: &str) -> WebApproval {
    WebApproval {
        order_id: Some(order_id.to_string()),
        payer_id: Some(payer_id.to_string()),
    }
}
