use crate::domain::config::CheckoutConfig;
use crate::domain::ports::{ConfigProvider, PresentationContext};
use crate::error::Result;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

/// In-process config source. The host application mutates the client id when
/// the SDK is initialized or torn down; the correlator only ever reads.
pub struct StaticConfigProvider {
    config: Mutex<CheckoutConfig>,
}

impl StaticConfigProvider {
    pub fn new(config: CheckoutConfig) -> Self {
        Self {
            config: Mutex::new(config),
        }
    }

    pub fn sandbox(client_id: &str) -> Self {
        Self::new(CheckoutConfig::sandbox(client_id))
    }

    /// Provider with no credentials; `initiate` against it reports
    /// "SDK not initialized" through the result channel.
    pub fn unconfigured() -> Self {
        Self::new(CheckoutConfig::default())
    }

    pub fn set_client_id(&self, client_id: Option<String>) {
        self.config.lock().expect("config poisoned").client_id = client_id;
    }
}

impl ConfigProvider for StaticConfigProvider {
    fn checkout_config(&self) -> CheckoutConfig {
        self.config.lock().expect("config poisoned").clone()
    }
}

/// Loads a [`CheckoutConfig`] from a JSON file once at startup.
pub struct FileConfigProvider {
    config: CheckoutConfig,
}

impl FileConfigProvider {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let config = serde_json::from_reader(file)?;
        Ok(Self { config })
    }
}

impl ConfigProvider for FileConfigProvider {
    fn checkout_config(&self) -> CheckoutConfig {
        self.config.clone()
    }
}

/// Presentation context of a host that always has a foreground surface.
pub struct AlwaysForeground;

impl PresentationContext for AlwaysForeground {
    fn is_foreground_available(&self) -> bool {
        true
    }
}

/// Presentation context of a backgrounded host; `initiate` against it fails
/// synchronously.
pub struct NoForeground;

impl PresentationContext for NoForeground {
    fn is_foreground_available(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::Environment;
    use std::io::Write;

    #[test]
    fn test_static_provider_client_id_lifecycle() {
        let provider = StaticConfigProvider::unconfigured();
        assert_eq!(provider.checkout_config().client_id, None);

        provider.set_client_id(Some("abc".to_string()));
        assert_eq!(provider.checkout_config().client_id.as_deref(), Some("abc"));

        provider.set_client_id(None);
        assert_eq!(provider.checkout_config().client_id, None);
    }

    #[test]
    fn test_file_provider_loads_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"clientId": "abc", "environment": "live", "returnScheme": "shop"}}"#
        )
        .unwrap();

        let provider = FileConfigProvider::load(file.path()).unwrap();
        let config = provider.checkout_config();
        assert_eq!(config.client_id.as_deref(), Some("abc"));
        assert_eq!(config.environment, Environment::Live);
        assert_eq!(config.return_scheme, "shop");
    }

    #[test]
    fn test_file_provider_rejects_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(FileConfigProvider::load(file.path()).is_err());
    }
}
