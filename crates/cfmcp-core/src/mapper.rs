//! Exception-to-message mapping at the tool boundary
//!
//! The handler raises typed [`Error`]s; this module is the only place they
//! become caller-facing text. Kinds are checked in a fixed order and the
//! first one that applies to the tool's [`Subject`] wins:
//!
//! 1. authentication
//! 2. not found, naming the subject's identifier
//! 3. permission denied (cache purge only)
//! 4. connection failure, with its detail
//! 5. anything else, verbatim

use crate::error::Error;

/// What a tool operates on, for message interpolation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject<'a> {
    /// Account-scoped call; not-found falls through to its own text
    Account,
    Zone(&'a str),
    /// A purge on this zone; also maps permission failures
    CachePurge(&'a str),
    DnsRecord(&'a str),
    CustomHostname(&'a str),
    WorkerScript(&'a str),
}

impl Subject<'_> {
    fn not_found_message(&self) -> Option<String> {
        match self {
            Subject::Account => None,
            Subject::Zone(id) | Subject::CachePurge(id) => Some(format!("Zone {} does not exist", id)),
            Subject::DnsRecord(id) => Some(format!("DNS record {} does not exist", id)),
            Subject::CustomHostname(id) => Some(format!("Custom hostname {} does not exist", id)),
            Subject::WorkerScript(name) => Some(format!("Worker script {} does not exist", name)),
        }
    }
}

pub const INVALID_CREDENTIAL: &str = "Invalid CF_API_TOKEN, check that the credential is correct";

pub const PURGE_PERMISSION_DENIED: &str =
    "No permission to purge cache, check the API token's Cache Purge permission";

/// Render `err` as the message of an error envelope
pub fn describe(err: &Error, subject: Subject<'_>) -> String {
    match err {
        Error::Authentication(_) => INVALID_CREDENTIAL.to_string(),
        Error::NotFound(_) => subject
            .not_found_message()
            .unwrap_or_else(|| err.to_string()),
        Error::PermissionDenied(_) if matches!(subject, Subject::CachePurge(_)) => {
            PURGE_PERMISSION_DENIED.to_string()
        }
        Error::Connection(detail) => format!("Failed to connect to Cloudflare API: {}", detail),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_ignores_subject() {
        for subject in [Subject::Account, Subject::Zone("z"), Subject::DnsRecord("r")] {
            assert_eq!(describe(&Error::auth("401"), subject), INVALID_CREDENTIAL);
        }
    }

    #[test]
    fn test_not_found_interpolates_identifier() {
        let err = Error::not_found("404");
        assert_eq!(describe(&err, Subject::Zone("zone-9")), "Zone zone-9 does not exist");
        assert!(describe(&err, Subject::DnsRecord("rec-1")).contains("rec-1"));
        assert!(describe(&err, Subject::CustomHostname("ch-1")).contains("ch-1"));
        assert!(describe(&err, Subject::WorkerScript("ghost-worker")).contains("ghost-worker"));
    }

    #[test]
    fn test_not_found_without_subject_falls_through() {
        let err = Error::not_found("no such account");
        assert_eq!(describe(&err, Subject::Account), "Not found: no such account");
    }

    #[test]
    fn test_permission_only_mapped_for_purge() {
        let err = Error::permission_denied("10000: forbidden");
        assert_eq!(describe(&err, Subject::CachePurge("z")), PURGE_PERMISSION_DENIED);
        assert_eq!(
            describe(&err, Subject::Zone("z")),
            "Permission denied: 10000: forbidden"
        );
    }

    #[test]
    fn test_connection_carries_detail() {
        let err = Error::connection("dns error: no such host");
        assert_eq!(
            describe(&err, Subject::Account),
            "Failed to connect to Cloudflare API: dns error: no such host"
        );
    }

    #[test]
    fn test_other_kinds_verbatim() {
        let err = Error::api(400, "9005: content invalid");
        assert_eq!(describe(&err, Subject::Zone("z")), err.to_string());
        let err = Error::config("CF_API_TOKEN or CF_API_KEY + CF_API_EMAIL must be set");
        assert!(describe(&err, Subject::Account).contains("CF_API_TOKEN"));
    }
}
