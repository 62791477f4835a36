use crate::error::{CheckoutError, Result};
use url::Url;

/// The payload delivered when the application regains control after the user
/// left it for an external authorization surface.
///
/// The correlator only ever inspects the scheme and query parameters; the
/// relaunch routing itself belongs to the host application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelaunchSignal {
    url: Url,
}

impl RelaunchSignal {
    pub fn parse(raw: &str) -> Result<Self> {
        Url::parse(raw)
            .map(|url| Self { url })
            .map_err(|err| CheckoutError::InvalidSignal(err.to_string()))
    }

    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    /// First query parameter with the given name, percent-decoded.
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }
}

impl From<Url> for RelaunchSignal {
    fn from(url: Url) -> Self {
        Self { url }
    }
}
