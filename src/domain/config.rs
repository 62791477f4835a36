use serde::{Deserialize, Serialize};

/// Target environment for the payment SDK.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Sandbox,
    Live,
}

impl Environment {
    /// Parses the environment vocabulary case-insensitively, falling back to
    /// `Sandbox` for unrecognized input.
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "live" => Self::Live,
            _ => Self::Sandbox,
        }
    }
}

/// Funding source for a web checkout request.
///
/// The wire vocabulary is `"paypal"`, `"credit"` and `"payLater"`; anything
/// else maps to `Paypal`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "camelCase")]
pub enum FundingSource {
    #[default]
    Paypal,
    PaypalCredit,
    PayLater,
}

impl FundingSource {
    pub fn parse(value: &str) -> Self {
        match value {
            "paypal" => Self::Paypal,
            "credit" => Self::PaypalCredit,
            "payLater" => Self::PayLater,
            _ => Self::Paypal,
        }
    }
}

/// When the card flow should force a strong-authentication challenge.
///
/// Vocabulary is `"always"` and `"whenRequired"`, defaulting to
/// `WhenRequired`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "camelCase")]
pub enum StrongAuthPolicy {
    Always,
    #[default]
    WhenRequired,
}

impl StrongAuthPolicy {
    pub fn parse(value: &str) -> Self {
        match value {
            "always" => Self::Always,
            "whenRequired" => Self::WhenRequired,
            _ => Self::WhenRequired,
        }
    }
}

/// Client credentials and environment supplied by the config provider.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckoutConfig {
    /// Client id issued by the payment processor. Absent until the host
    /// application has initialized the SDK.
    pub client_id: Option<String>,
    pub environment: Environment,
    /// Custom URI scheme the relaunch signal must carry to be claimed by
    /// this flow.
    pub return_scheme: String,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            environment: Environment::Sandbox,
            return_scheme: DEFAULT_RETURN_SCHEME.to_string(),
        }
    }
}

pub const DEFAULT_RETURN_SCHEME: &str = "payflow";

impl CheckoutConfig {
    pub fn sandbox(client_id: impl Into<String>) -> Self {
        Self {
            client_id: Some(client_id.into()),
            ..Self::default()
        }
    }
}

/// Parameters for starting a web-redirect checkout.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
pub struct WebCheckoutParams {
    pub funding: FundingSource,
}

/// Parameters for starting a card authorization.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct CardCheckoutParams {
    pub card: CardDetails,
    pub sca: StrongAuthPolicy,
}

/// Raw card fields as collected by the caller. Serialization into the
/// SDK-specific request shape happens behind the authorization port.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    pub number: String,
    pub expiration_month: String,
    pub expiration_year: String,
    pub security_code: String,
    pub cardholder_name: Option<String>,
    pub billing_address: BillingAddress,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct BillingAddress {
    pub country_code: String,
    pub street_address: Option<String>,
    pub extended_address: Option<String>,
    pub locality: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_funding_source_vocabulary() {
        assert_eq!(FundingSource::parse("paypal"), FundingSource::Paypal);
        assert_eq!(FundingSource::parse("credit"), FundingSource::PaypalCredit);
        assert_eq!(FundingSource::parse("payLater"), FundingSource::PayLater);
        assert_eq!(FundingSource::parse("unknown-value"), FundingSource::Paypal);
        assert_eq!(FundingSource::parse(""), FundingSource::Paypal);
    }

    #[test]
    fn test_strong_auth_vocabulary() {
        assert_eq!(StrongAuthPolicy::parse("always"), StrongAuthPolicy::Always);
        assert_eq!(
            StrongAuthPolicy::parse("whenRequired"),
            StrongAuthPolicy::WhenRequired
        );
        assert_eq!(
            StrongAuthPolicy::parse("sometimes"),
            StrongAuthPolicy::WhenRequired
        );
    }

    #[test]
    fn test_environment_parse_is_case_insensitive() {
        assert_eq!(Environment::parse("live"), Environment::Live);
        assert_eq!(Environment::parse("LIVE"), Environment::Live);
        assert_eq!(Environment::parse("sandbox"), Environment::Sandbox);
        assert_eq!(Environment::parse("staging"), Environment::Sandbox);
    }

    #[test]
    fn test_config_deserialization_defaults() {
        let config: CheckoutConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.client_id, None);
        assert_eq!(config.environment, Environment::Sandbox);
        assert_eq!(config.return_scheme, "payflow");

        let config: CheckoutConfig = serde_json::from_str(
            r#"{"clientId": "abc", "environment": "live", "returnScheme": "shop"}"#,
        )
        .unwrap();
        assert_eq!(config.client_id.as_deref(), Some("abc"));
        assert_eq!(config.environment, Environment::Live);
        assert_eq!(config.return_scheme, "shop");
    }
}
