#![allow(dead_code)]

use payflow::application::correlator::SessionCorrelator;
use payflow::domain::ports::AuthorizationClient;
use payflow::domain::result::CheckoutResult;
use payflow::infrastructure::config_provider::{AlwaysForeground, StaticConfigProvider};
use payflow::infrastructure::scripted::{ScriptedCardClient, ScriptedWebClient};
use std::sync::{Arc, Mutex};

pub type Events<P> = Arc<Mutex<Vec<CheckoutResult<P>>>>;

/// Subscribes a vector-backed collector and returns it.
pub fn subscribe_events<A: AuthorizationClient>(
    correlator: &SessionCorrelator<A>,
) -> Events<A::Approval> {
    let events: Events<A::Approval> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    correlator.subscribe(move |result| sink.lock().unwrap().push(result));
    events
}

pub fn web_correlator() -> (Arc<ScriptedWebClient>, SessionCorrelator<ScriptedWebClient>) {
    let client = Arc::new(ScriptedWebClient::new());
    let correlator = SessionCorrelator::new(
        Arc::clone(&client),
        Arc::new(StaticConfigProvider::sandbox("test-client")),
        Arc::new(AlwaysForeground),
    );
    (client, correlator)
}

pub fn card_params() -> payflow::domain::config::CardCheckoutParams {
    use payflow::domain::config::{BillingAddress, CardCheckoutParams, CardDetails, StrongAuthPolicy};
    CardCheckoutParams {
        card: CardDetails {
            number: "4111111111111111".to_string(),
            expiration_month: "01".to_string(),
            expiration_year: "2030".to_string(),
            security_code: "123".to_string(),
            cardholder_name: Some("Jane Doe".to_string()),
            billing_address: BillingAddress {
                country_code: "US".to_string(),
                ..BillingAddress::default()
            },
        },
        sca: StrongAuthPolicy::WhenRequired,
    }
}

pub fn card_correlator() -> (
    Arc<ScriptedCardClient>,
    SessionCorrelator<ScriptedCardClient>,
) {
    let client = Arc::new(ScriptedCardClient::new());
    let correlator = SessionCorrelator::new(
        Arc::clone(&client),
        Arc::new(StaticConfigProvider::sandbox("test-client")),
        Arc::new(AlwaysForeground),
    );
    (client, correlator)
}
