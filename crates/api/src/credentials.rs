//! Explicit loading of the OpenAI credentials used by the endpoint probe.
//!
//! Values come from the process environment first and fall back to the
//! project's `.env` file. Nothing is written back into the environment; the
//! result is a plain value handed to whoever needs it.

use std::collections::HashMap;
use std::env;
use std::io;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
/// Environment variable holding the API base URL.
pub const API_BASE_VAR: &str = "OPENAI_API_BASE";

/// Error surfaced when the `.env` file exists but cannot be read.
#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("failed to read env file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: dotenvy::Error,
    },
}

/// Immutable snapshot of the probe credentials.
///
/// Empty values are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiCredentials {
    pub api_key: Option<String>,
    pub api_base: Option<String>,
}

impl ApiCredentials {
    /// Load credentials from the process environment and `env_file`.
    ///
    /// A variable that is already set in the environment wins over the file
    /// entry. A missing file is not an error.
    pub fn load(env_file: &Path) -> Result<Self, CredentialsError> {
        let file_values = read_env_file(env_file)?;
        Ok(Self::resolve(|name| env::var(name).ok(), &file_values))
    }

    /// Credentials from the process environment alone.
    pub fn from_environment() -> Self {
        Self::resolve(|name| env::var(name).ok(), &HashMap::new())
    }

    fn resolve(lookup: impl Fn(&str) -> Option<String>, file_values: &HashMap<String, String>) -> Self {
        let pick = |name: &str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .or_else(|| file_values.get(name).filter(|value| !value.is_empty()).cloned())
        };
        Self {
            api_key: pick(API_KEY_VAR),
            api_base: pick(API_BASE_VAR),
        }
    }

    /// Returns `(api_base, api_key)` when both values are configured.
    pub fn complete(&self) -> Option<(&str, &str)> {
        Some((self.api_base.as_deref()?, self.api_key.as_deref()?))
    }
}

fn read_env_file(path: &Path) -> Result<HashMap<String, String>, CredentialsError> {
    let entries = match dotenvy::from_path_iter(path) {
        Ok(entries) => entries,
        Err(dotenvy::Error::Io(error)) if error.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "env file not found; using process environment only");
            return Ok(HashMap::new());
        }
        Err(source) => {
            return Err(CredentialsError::Read {
                path: path.display().to_string(),
                source,
            });
        }
    };

    let mut values = HashMap::new();
    for entry in entries {
        match entry {
            Ok((key, value)) => {
                values.insert(key, value);
            }
            Err(error) => warn!(path = %path.display(), %error, "skipping unparsable env file line"),
        }
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn process_environment_wins_over_file() {
        let file = file_values(&[(API_KEY_VAR, "sk-file"), (API_BASE_VAR, "https://file.example")]);
        let credentials = ApiCredentials::resolve(
            |name| (name == API_KEY_VAR).then(|| "sk-process".to_string()),
            &file,
        );
        assert_eq!(credentials.api_key.as_deref(), Some("sk-process"));
        assert_eq!(credentials.api_base.as_deref(), Some("https://file.example"));
    }

    #[test]
    fn empty_values_count_as_absent() {
        let file = file_values(&[(API_KEY_VAR, ""), (API_BASE_VAR, "https://file.example")]);
        let credentials = ApiCredentials::resolve(|_| Some(String::new()), &file);
        assert_eq!(credentials.api_key, None);
        assert_eq!(credentials.complete(), None);
    }

    #[test]
    fn complete_requires_both_values() {
        let credentials = ApiCredentials {
            api_key: Some("sk-1".into()),
            api_base: Some("https://api.example.com".into()),
        };
        assert_eq!(credentials.complete(), Some(("https://api.example.com", "sk-1")));

        let partial = ApiCredentials {
            api_key: Some("sk-1".into()),
            api_base: None,
        };
        assert_eq!(partial.complete(), None);
    }

    #[test]
    fn load_reads_env_file_without_touching_environment() {
        let dir = tempfile::tempdir().unwrap();
        let env_path = dir.path().join(".env");
        std::fs::write(
            &env_path,
            "# local settings\nOPENAI_API_KEY=sk-from-file\nOPENAI_API_BASE=\"https://api.example.com/v1\"\n",
        )
        .unwrap();

        temp_env::with_vars_unset([API_KEY_VAR, API_BASE_VAR], || {
            let credentials = ApiCredentials::load(&env_path).unwrap();
            assert_eq!(credentials.api_key.as_deref(), Some("sk-from-file"));
            assert_eq!(credentials.api_base.as_deref(), Some("https://api.example.com/v1"));
            assert!(env::var(API_KEY_VAR).is_err());
        });
    }

    #[test]
    fn missing_env_file_falls_back_to_environment() {
        let dir = tempfile::tempdir().unwrap();
        temp_env::with_vars(
            [(API_KEY_VAR, Some("sk-env")), (API_BASE_VAR, Some("https://env.example"))],
            || {
                let credentials = ApiCredentials::load(&dir.path().join(".env")).unwrap();
                assert_eq!(credentials.complete(), Some(("https://env.example", "sk-env")));
            },
        );
    }
}
