use std::time::Duration;

use codex_doctor_api::{ApiCredentials, ProbeOutcome, probe_models};
use tracing::debug;

use crate::config::ProbeSettings;
use crate::report::{CheckKind, CheckReport, CheckStatus};

/// Probe `<api_base>/models` when credentials are configured.
///
/// Every probe outcome is at worst a warning; an unreachable endpoint never
/// fails the run.
pub async fn check_api_endpoint(credentials: &ApiCredentials, settings: &ProbeSettings) -> CheckReport {
    let mut report = CheckReport::new(CheckKind::ApiEndpoint);

    if !settings.enabled {
        report.warn("Endpoint test disabled, skipping");
        return report.with_status(CheckStatus::Skipped);
    }

    let Some((api_base, api_key)) = credentials.complete() else {
        report.warn("API credentials not configured, skipping endpoint test");
        return report.with_status(CheckStatus::Skipped);
    };

    report.info("Testing connection to API endpoint...");
    debug!(api_base, timeout_ms = settings.timeout.as_millis() as u64, "probing endpoint");

    match probe_models(api_base, api_key, settings.timeout).await {
        ProbeOutcome::Reached(status) if status.as_u16() == 200 => {
            report.ok(format!("API endpoint is reachable (Status: {})", status.as_u16()));
        }
        ProbeOutcome::Reached(status) => {
            report.warn(format!("API returned status: {}", status.as_u16()));
        }
        ProbeOutcome::Unreachable(message) => {
            report.missing_as_warning(format!("Cannot reach API endpoint: {message}"));
        }
        ProbeOutcome::TimedOut => {
            report.warn(format!("API request timeout ({})", describe_timeout(settings.timeout)));
        }
    }

    report
}

/// Render a timeout compactly: whole seconds as `5s`, anything else in ms.
pub fn describe_timeout(timeout: Duration) -> String {
    if timeout.subsec_millis() == 0 && timeout.as_secs() > 0 {
        format!("{}s", timeout.as_secs())
    } else {
        format!("{}ms", timeout.as_millis())
    }
}
