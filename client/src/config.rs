//! Deployment configuration loaded via OrthoConfig.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_API_BASE: &str = "/api";
const DEFAULT_STORE_FILE: &str = "photoclub-store.json";

/// Configuration values for the remote gateway and the local mirror.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PHOTOCLUB")]
pub struct ClientSettings {
    /// API base path; resolved against the deployment origin.
    pub api_base: Option<String>,
    /// Location of the local mirror document.
    pub store_path: Option<PathBuf>,
}

impl ClientSettings {
    /// Return the configured API base path, falling back to the default.
    pub fn api_base(&self) -> &str {
        self.api_base.as_deref().unwrap_or(DEFAULT_API_BASE)
    }

    /// Return the configured store path, falling back to the default.
    pub fn store_path(&self) -> PathBuf {
        self.store_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_FILE))
    }

    /// Resolve the API base path against a deployment origin.
    ///
    /// # Errors
    ///
    /// Returns an error when the origin and base path do not combine into a
    /// valid absolute URL.
    pub fn api_url(&self, origin: &url::Url) -> Result<url::Url, url::ParseError> {
        origin.join(self.api_base())
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> ClientSettings {
        ClientSettings::load_from_iter([OsString::from("photoclub-client")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("PHOTOCLUB_API_BASE", None::<String>),
            ("PHOTOCLUB_STORE_PATH", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.api_base(), DEFAULT_API_BASE);
        assert_eq!(settings.store_path(), PathBuf::from(DEFAULT_STORE_FILE));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("PHOTOCLUB_API_BASE", Some("/club/api".to_owned())),
            (
                "PHOTOCLUB_STORE_PATH",
                Some("/tmp/photoclub.json".to_owned()),
            ),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.api_base(), "/club/api");
        assert_eq!(settings.store_path(), PathBuf::from("/tmp/photoclub.json"));
    }

    #[rstest]
    fn api_url_resolves_the_base_against_an_origin() {
        let _guard = lock_env([
            ("PHOTOCLUB_API_BASE", None::<String>),
            ("PHOTOCLUB_STORE_PATH", None::<String>),
        ]);

        let settings = load_from_empty_args();
        let origin = url::Url::parse("https://club.example").expect("origin parses");
        let api = settings.api_url(&origin).expect("base resolves");
        assert_eq!(api.as_str(), "https://club.example/api");
    }
}
