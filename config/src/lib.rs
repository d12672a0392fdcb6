//! Configuration for formflow.
//!
//! Settings come from a TOML file at `$FORMFLOW_CONFIG` or
//! `~/.formflow/config.toml`. A missing file means defaults. The email API
//! credential is never part of the code: it is read from `RESEND_API_KEY`, or
//! from `[mail] api_key` (which may reference `${ENV_VAR}`s).
//!
//! ```toml
//! [mail]
//! endpoint = "https://api.resend.com/emails"
//! api_key = "${RESEND_API_KEY}"
//! from = "nettside@evenlauritzen.no"
//! to = "post@evenlauritzen.no"
//!
//! [form]
//! mask_submission_failures = true
//! banner_seconds = 5
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs};

use serde::Deserialize;
use thiserror::Error;

use url::Url;

use formflow_types::{ApiKey, FormSchema, InvalidApiKeyError};

pub const CONFIG_PATH_ENV: &str = "FORMFLOW_CONFIG";
pub const API_KEY_ENV: &str = "RESEND_API_KEY";

/// Canonical Resend email endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.resend.com/emails";
pub const DEFAULT_FROM: &str = "nettside@evenlauritzen.no";
pub const DEFAULT_TO: &str = "post@evenlauritzen.no";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_BANNER_SECS: u64 = 5;
pub const DEFAULT_SUCCESS_MESSAGE: &str =
    "Takk for din henvendelse! Vi kontakter deg innen 24 timer.";
pub const DEFAULT_FAILURE_MESSAGE: &str =
    "Noe gikk galt under sending. Prøv igjen, eller ring oss direkte.";

// Default value function for serde (bool::default() is false, so only true needs a fn)
pub(crate) const fn default_true() -> bool {
    true
}

#[derive(Debug, Default, Deserialize)]
pub struct FormflowConfig {
    pub mail: Option<MailConfig>,
    pub form: Option<FormConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("no email API key: set RESEND_API_KEY or [mail] api_key")]
    MissingCredential,
    #[error("email endpoint must use https (got {0})")]
    InsecureEndpoint(String),
    #[error("email endpoint is not an http(s) URL: {0}")]
    InvalidEndpoint(String),
    #[error("email API key is unusable: {0}")]
    InvalidCredential(#[source] InvalidApiKeyError),
}

/// Email API settings as written in the file.
///
/// ```toml
/// [mail]
/// endpoint = "https://api.resend.com/emails"
/// api_key = "${RESEND_API_KEY}"
/// from = "nettside@evenlauritzen.no"
/// to = "post@evenlauritzen.no"
/// connect_timeout_secs = 30
/// ```
#[derive(Default, Deserialize)]
pub struct MailConfig {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub connect_timeout_secs: Option<u64>,
    /// Permit plain `http://` endpoints. Only meant for local mock servers.
    #[serde(default)]
    pub allow_insecure_endpoint: bool,
}

// Manual Debug impl to prevent leaking API keys in logs.
impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("endpoint", &self.endpoint)
            .field(
                "api_key",
                &if self.api_key.is_some() {
                    "[REDACTED]"
                } else {
                    "None"
                },
            )
            .field("from", &self.from)
            .field("to", &self.to)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("allow_insecure_endpoint", &self.allow_insecure_endpoint)
            .finish()
    }
}

/// Contact form behavior.
///
/// ```toml
/// [form]
/// mask_submission_failures = true
/// banner_seconds = 5
/// success_message = "Takk for din henvendelse!"
///
/// [[form.fields]]
/// name = "navn"
/// type = "text"
/// required = true
/// ```
#[derive(Debug, Deserialize)]
pub struct FormConfig {
    /// Show the success banner even when delivery failed. Default: true.
    #[serde(default = "default_true")]
    pub mask_submission_failures: bool,
    pub banner_seconds: Option<u64>,
    pub success_message: Option<String>,
    pub failure_message: Option<String>,
    /// Field declarations. Defaults to the contact form.
    pub fields: Option<FormSchema>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            mask_submission_failures: true,
            banner_seconds: None,
            success_message: None,
            failure_message: None,
            fields: None,
        }
    }
}

/// Resolved email API settings.
#[derive(Debug, Clone)]
pub struct MailSettings {
    pub endpoint: String,
    pub api_key: ApiKey,
    pub from: String,
    pub to: String,
    pub connect_timeout: Duration,
}

/// Resolved contact form settings.
#[derive(Debug, Clone)]
pub struct FormSettings {
    pub schema: FormSchema,
    pub mask_submission_failures: bool,
    pub banner_duration: Duration,
    pub success_message: String,
    pub failure_message: String,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            schema: FormSchema::contact(),
            mask_submission_failures: true,
            banner_duration: Duration::from_secs(DEFAULT_BANNER_SECS),
            success_message: DEFAULT_SUCCESS_MESSAGE.to_string(),
            failure_message: DEFAULT_FAILURE_MESSAGE.to_string(),
        }
    }
}

pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        let var = &after[..end];
        if !var.is_empty() {
            out.push_str(&env::var(var).unwrap_or_default());
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}

impl FormflowConfig {
    /// Load the config file if it exists.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let Some(path) = config_path() else {
            return Ok(None);
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file; using defaults");
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(config),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    /// Resolve email settings, taking the credential from `RESEND_API_KEY` first.
    pub fn mail_settings(&self) -> Result<MailSettings, ConfigError> {
        self.mail_settings_with(env::var(API_KEY_ENV).ok())
    }

    /// Resolve email settings with an explicit environment credential.
    pub fn mail_settings_with(
        &self,
        env_api_key: Option<String>,
    ) -> Result<MailSettings, ConfigError> {
        let defaults = MailConfig::default();
        let mail = self.mail.as_ref().unwrap_or(&defaults);

        let endpoint = mail
            .endpoint
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .unwrap_or(DEFAULT_ENDPOINT)
            .to_string();
        check_endpoint(&endpoint, mail.allow_insecure_endpoint)?;

        let from_env = env_api_key.map(credential).transpose()?.flatten();
        let api_key = match from_env {
            Some(key) => key,
            None => mail
                .api_key
                .as_deref()
                .map(|raw| credential(expand_env_vars(raw)))
                .transpose()?
                .flatten()
                .ok_or(ConfigError::MissingCredential)?,
        };

        Ok(MailSettings {
            endpoint,
            api_key,
            from: mail.from.clone().unwrap_or_else(|| DEFAULT_FROM.to_string()),
            to: mail.to.clone().unwrap_or_else(|| DEFAULT_TO.to_string()),
            connect_timeout: Duration::from_secs(
                mail.connect_timeout_secs
                    .filter(|secs| *secs > 0)
                    .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
            ),
        })
    }

    #[must_use]
    pub fn form_settings(&self) -> FormSettings {
        let defaults = FormSettings::default();
        let Some(form) = self.form.as_ref() else {
            return defaults;
        };

        FormSettings {
            schema: form.fields.clone().unwrap_or(defaults.schema),
            mask_submission_failures: form.mask_submission_failures,
            banner_duration: form
                .banner_seconds
                .map_or(defaults.banner_duration, Duration::from_secs),
            success_message: form
                .success_message
                .clone()
                .unwrap_or(defaults.success_message),
            failure_message: form
                .failure_message
                .clone()
                .unwrap_or(defaults.failure_message),
        }
    }
}

fn check_endpoint(endpoint: &str, allow_insecure: bool) -> Result<(), ConfigError> {
    let invalid = || ConfigError::InvalidEndpoint(endpoint.to_string());
    let url = Url::parse(endpoint).map_err(|_| invalid())?;
    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid());
    }

    match url.scheme() {
        "https" => Ok(()),
        "http" if allow_insecure => {
            tracing::warn!(endpoint, "Using insecure email endpoint");
            Ok(())
        }
        "http" => Err(ConfigError::InsecureEndpoint(endpoint.to_string())),
        _ => Err(invalid()),
    }
}

/// A blank credential counts as unset; anything else must be a usable key.
fn credential(raw: impl Into<String>) -> Result<Option<ApiKey>, ConfigError> {
    match ApiKey::new(raw) {
        Ok(key) => Ok(Some(key)),
        Err(InvalidApiKeyError::Empty) => Ok(None),
        Err(err) => Err(ConfigError::InvalidCredential(err)),
    }
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(explicit) = env::var_os(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(explicit));
    }
    dirs::home_dir().map(|home| home.join(".formflow").join("config.toml"))
}
