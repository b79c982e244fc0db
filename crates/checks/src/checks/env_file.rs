use std::fs;
use std::path::Path;

use codex_doctor_api::{API_BASE_VAR, API_KEY_VAR};
use codex_doctor_util::secret_prefix;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::report::{CheckKind, CheckReport};

/// Characters of the API key shown before the ellipsis.
const VISIBLE_KEY_CHARS: usize = 15;

static API_KEY_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^OPENAI_API_KEY=(.+)$").expect("api key pattern should compile"));
static API_BASE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^OPENAI_API_BASE=(.+)$").expect("api base pattern should compile"));

/// Textual scan of a `.env` file for the two credential markers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvFileScan {
    pub has_api_key_marker: bool,
    pub has_api_base_marker: bool,
    /// Captured only when both markers are present.
    pub api_key: Option<String>,
    pub api_base: Option<String>,
}

impl EnvFileScan {
    pub fn scan(content: &str) -> Self {
        let has_api_key_marker = content.contains(&format!("{API_KEY_VAR}="));
        let has_api_base_marker = content.contains(&format!("{API_BASE_VAR}="));

        let (api_key, api_base) = if has_api_key_marker && has_api_base_marker {
            (capture_line(&API_KEY_LINE, content), capture_line(&API_BASE_LINE, content))
        } else {
            (None, None)
        };

        Self {
            has_api_key_marker,
            has_api_base_marker,
            api_key,
            api_base,
        }
    }
}

fn capture_line(pattern: &Regex, content: &str) -> Option<String> {
    pattern
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|value| value.as_str().trim_end_matches('\r').to_string())
}

/// Report whether the `.env` file exists and mentions both credentials.
pub fn check_env_file(path: &Path) -> CheckReport {
    let mut report = CheckReport::new(CheckKind::EnvFile);
    debug!(path = %path.display(), "checking env file");

    if !path.is_file() {
        report.missing(".env file not found!");
        return report;
    }

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(error) => {
            report.missing(format!("Cannot read .env file: {error}"));
            return report;
        }
    };

    let scan = EnvFileScan::scan(&content);
    for (found, label) in [(scan.has_api_key_marker, "API Key"), (scan.has_api_base_marker, "API Base")] {
        if found {
            report.ok(format!(".env file: {label} found"));
        } else {
            report.missing(format!(".env file: {label} not found"));
        }
    }

    if let (Some(api_key), Some(api_base)) = (&scan.api_key, &scan.api_base) {
        report.info(format!("API Key: {}", secret_prefix(api_key, VISIBLE_KEY_CHARS)));
        report.info(format!("API Base: {api_base}"));
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{CheckStatus, Marker};

    #[test]
    fn shows_key_prefix_and_full_base() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(
            &path,
            "OPENAI_API_KEY=sk-test1234567890123\nOPENAI_API_BASE=https://api.example.com",
        )
        .unwrap();

        let report = check_env_file(&path);
        assert_eq!(report.status, CheckStatus::Passed);
        let rendered: Vec<String> = report.lines.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                "✓ .env file: API Key found",
                "✓ .env file: API Base found",
                "API Key: sk-test12345678...",
                "API Base: https://api.example.com",
            ]
        );
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let report = check_env_file(&dir.path().join(".env"));
        assert_eq!(report.status, CheckStatus::Failed);
        assert!(report.mentions(".env file not found!"));
        assert_eq!(report.count(Marker::Missing), 1);
    }

    #[test]
    fn markers_are_reported_independently() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "OPENAI_API_KEY=sk-only\n").unwrap();

        let report = check_env_file(&path);
        assert_eq!(report.status, CheckStatus::Failed);
        assert_eq!(report.count(Marker::Ok), 1);
        assert_eq!(report.count(Marker::Missing), 1);
        let rendered: Vec<String> = report.lines.iter().map(ToString::to_string).collect();
        assert!(rendered.contains(&"✓ .env file: API Key found".to_string()));
        assert!(rendered.contains(&"✗ .env file: API Base not found".to_string()));
        assert!(!report.mentions("API Key: "));
    }

    #[test]
    fn scan_trims_carriage_returns() {
        let scan = EnvFileScan::scan("OPENAI_API_KEY=sk-abc\r\nOPENAI_API_BASE=https://h/v1\r\n");
        assert_eq!(scan.api_key.as_deref(), Some("sk-abc"));
        assert_eq!(scan.api_base.as_deref(), Some("https://h/v1"));
    }

    #[test]
    fn scan_needs_line_anchored_assignment_for_values() {
        let scan = EnvFileScan::scan("# OPENAI_API_KEY=commented\nOPENAI_API_BASE=https://h\n");
        assert!(scan.has_api_key_marker);
        assert!(scan.has_api_base_marker);
        assert_eq!(scan.api_key, None);
        assert_eq!(scan.api_base.as_deref(), Some("https://h"));
    }
}
