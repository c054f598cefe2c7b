//! [`Screening`] definitions.

use std::{str::FromStr, sync::LazyLock};

use common::{define_kind, Date};
use derive_more::{AsRef, Display};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

/// Result of a background check of a rental applicant.
///
/// Fetched fresh on every request and never cached.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Screening {
    /// Indicator whether the applicant is blacklisted.
    pub is_blacklisted: bool,

    /// Reason the applicant is blacklisted for.
    #[serde(default)]
    pub blacklist_reason: Option<String>,

    /// [`Severity`] of the blacklisting.
    #[serde(default)]
    pub blacklist_severity: Option<Severity>,

    /// [`Date`] the applicant was blacklisted at.
    #[serde(default, deserialize_with = "lenient_date")]
    pub blacklisted_date: Option<Date>,

    /// [`Recommendation`] on the applicant.
    pub recommendation: Recommendation,

    /// Human-readable reasoning behind the [`Recommendation`].
    #[serde(default)]
    pub recommendation_reason: String,
}

define_kind! {
    #[doc = "Severity of an applicant blacklisting."]
    #[case = "lowercase"]
    enum Severity {
        #[doc = "Minor incident."]
        Low = 1,

        #[doc = "Incident worth a closer look."]
        Medium = 2,

        #[doc = "Serious incident."]
        High = 3,
    }
}

define_kind! {
    #[doc = "Recommendation on a rental applicant."]
    #[case = "lowercase"]
    enum Recommendation {
        #[doc = "Applicant may be accepted."]
        Approve = 1,

        #[doc = "Applicant requires a manual review."]
        Review = 2,

        #[doc = "Applicant should be rejected."]
        Deny = 3,
    }
}

/// Deserializes an optional [`Date`] out of either a bare `YYYY-MM-DD` date
/// or a full timestamp, keeping its date part only.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<Date>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error as _;

    Option::<String>::deserialize(deserializer)?
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.get(..10).unwrap_or(&s).parse().map_err(D::Error::custom))
        .transpose()
}

/// Email address of a rental applicant.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq, Serialize)]
#[as_ref(str, String)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Creates a new [`Email`] if the given `address` is valid.
    ///
    /// Surrounding whitespace is trimmed.
    #[must_use]
    pub fn new(address: impl AsRef<str>) -> Option<Self> {
        let address = address.as_ref().trim();
        Self::check(address).then(|| Self(address.to_owned()))
    }

    /// Checks whether the given `address` is a valid [`Email`].
    fn check(address: &str) -> bool {
        /// Regular expression checking [`Email`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[^@\s]+@[^@\s]+$").expect("valid regex")
        });

        address.len() <= 254 && REGEX.is_match(address)
    }
}

impl FromStr for Email {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Email`")
    }
}

#[cfg(test)]
pub(crate) mod spec {
    use super::{Email, Recommendation, Screening, Severity};

    /// Returns a [`Screening`] of a blacklisted applicant.
    pub(crate) fn blacklisted() -> Screening {
        Screening {
            is_blacklisted: true,
            blacklist_reason: Some("Unpaid rent".into()),
            blacklist_severity: Some(Severity::High),
            blacklisted_date: Some("2024-03-15".parse().unwrap()),
            recommendation: Recommendation::Deny,
            recommendation_reason: "Prior eviction".into(),
        }
    }

    #[test]
    fn decodes_backend_payload() {
        let screening: Screening = serde_json::from_str(
            r#"{
                "isBlacklisted": true,
                "blacklistReason": "Unpaid rent",
                "blacklistSeverity": "high",
                "blacklistedDate": "2024-03-15T10:00:00.000Z",
                "recommendation": "deny",
                "recommendationReason": "Prior eviction"
            }"#,
        )
        .unwrap();
        assert_eq!(screening, blacklisted());

        let clean: Screening = serde_json::from_str(
            r#"{
                "isBlacklisted": false,
                "blacklistReason": null,
                "blacklistedDate": "",
                "recommendation": "approve",
                "recommendationReason": "No records"
            }"#,
        )
        .unwrap();
        assert!(!clean.is_blacklisted);
        assert_eq!(clean.blacklisted_date, None);
        assert_eq!(clean.recommendation, Recommendation::Approve);
    }

    #[test]
    fn rejects_unknown_recommendation() {
        assert!(serde_json::from_str::<Screening>(
            r#"{"isBlacklisted": false, "recommendation": "maybe"}"#,
        )
        .is_err());
    }

    #[test]
    fn email_is_checked() {
        assert_eq!(
            Email::new(" jordan@example.com ").unwrap().to_string(),
            "jordan@example.com",
        );
        assert!(Email::new("").is_none());
        assert!(Email::new("jordan").is_none());
        assert!(Email::new("jordan @example.com").is_none());
        assert!("a@b".parse::<Email>().is_ok());
    }
}
