//! Client settings, stored as plain JSON next to the local vault cache.
//!
//! Nothing in here is secret. Every field has a default so an old or
//! hand-edited file still loads.

use std::fs;
use std::path::Path;

use chrono::TimeDelta;
use keepsake_crypto_core::memory::SecretBytes;
use keepsake_crypto_core::secret::generate_secret;
use serde::{Deserialize, Serialize};

use crate::error::VaultError;

/// Persisted client settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClientSettings {
    /// Length in bytes of newly generated vault keys.
    #[serde(default = "default_secret_key_length")]
    pub secret_key_length: usize,

    /// Seconds before token expiry at which the session is refreshed.
    #[serde(default = "default_expiry_leeway")]
    pub expiry_leeway_seconds: u32,

    /// Disable terminal echo while the master password is typed.
    #[serde(default = "default_mask_secret_input")]
    pub mask_secret_input: bool,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            secret_key_length: default_secret_key_length(),
            expiry_leeway_seconds: default_expiry_leeway(),
            mask_secret_input: default_mask_secret_input(),
        }
    }
}

const fn default_secret_key_length() -> usize {
    32
}
const fn default_expiry_leeway() -> u32 {
    30
}
const fn default_mask_secret_input() -> bool {
    true
}

const SETTINGS_FILE: &str = "settings.json";
const SETTINGS_TMP_FILE: &str = ".settings.json.tmp";

impl ClientSettings {
    /// Load settings from `{data_dir}/settings.json`.
    ///
    /// Falls back to [`Default::default()`] when the file is missing or
    /// unreadable.
    #[must_use]
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join(SETTINGS_FILE);
        match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::debug!(
                    path = %path.display(),
                    error = %e,
                    "corrupt settings, using defaults"
                );
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Persist settings to `{data_dir}/settings.json` (write to a temp
    /// file, then rename over the original).
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Settings`] if serialization fails and
    /// [`VaultError::Io`] if the directory is missing or the write/rename
    /// is rejected.
    pub fn save(&self, data_dir: &Path) -> Result<(), VaultError> {
        let path = data_dir.join(SETTINGS_FILE);
        let tmp = data_dir.join(SETTINGS_TMP_FILE);

        let json =
            serde_json::to_string_pretty(self).map_err(|e| VaultError::Settings(e.to_string()))?;

        fs::write(&tmp, &json)?;

        if let Err(e) = Self::install(&tmp, &path) {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                tracing::debug!(
                    path = %tmp.display(),
                    error = %cleanup,
                    "failed to remove temporary settings file"
                );
            }
            return Err(e.into());
        }
        Ok(())
    }

    /// Restrict `tmp` to the owner and move it over `path`.
    fn install(tmp: &Path, path: &Path) -> std::io::Result<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(tmp, fs::Permissions::from_mode(0o600))?;
        }
        fs::rename(tmp, path)
    }

    /// Refresh window as a duration.
    #[must_use]
    pub fn expiry_leeway(&self) -> TimeDelta {
        TimeDelta::seconds(i64::from(self.expiry_leeway_seconds))
    }

    /// Generate a fresh vault key of the configured length.
    ///
    /// # Errors
    ///
    /// Propagates [`keepsake_crypto_core::CryptoError::EntropyUnavailable`].
    pub fn generate_vault_key(&self) -> Result<SecretBytes, VaultError> {
        Ok(generate_secret(self.secret_key_length)?)
    }
}
