//! [`Notification`] definitions.

use std::fmt;

use common::{datetime, define_kind, unit, Date, DateTime, DateTimeOf};
use derive_more::{AsRef, Display, From};
use serde::{Deserialize, Deserializer, Serialize};
use time::{Duration, UtcOffset};

/// Message delivered to a property manager.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// ID of this [`Notification`].
    pub id: Id,

    /// Title of this [`Notification`].
    pub title: String,

    /// Content of this [`Notification`].
    #[serde(default)]
    pub content: String,

    /// [`Kind`] of this [`Notification`].
    #[serde(rename = "type", default)]
    pub kind: Kind,

    /// [`DateTime`] this [`Notification`] was delivered at.
    #[serde(with = "datetime::serde::rfc3339")]
    pub date: DateTimeOf<unit::Delivery>,

    /// Indicator whether this [`Notification`] has been read.
    #[serde(default)]
    pub is_read: bool,

    /// Indicator whether this [`Notification`] is urgent, regardless of
    /// whether it has been read.
    #[serde(default)]
    pub is_urgent: bool,
}

/// ID of a [`Notification`].
///
/// Accepts both numeric and string IDs on deserialization.
#[derive(
    AsRef, Clone, Debug, Display, Eq, From, Hash, Ord, PartialEq, PartialOrd,
    Serialize,
)]
#[as_ref(str)]
#[serde(transparent)]
pub struct Id(String);

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Num(i64),
            Str(String),
        }

        Ok(Self(match Raw::deserialize(deserializer)? {
            Raw::Num(n) => n.to_string(),
            Raw::Str(s) => s,
        }))
    }
}

/// Opaque kind of a [`Notification`] (like `payment` or `maintenance`).
#[derive(
    AsRef, Clone, Debug, Default, Deserialize, Display, Eq, From, PartialEq,
    Serialize,
)]
#[as_ref(str)]
#[serde(transparent)]
pub struct Kind(String);

define_kind! {
    #[doc = "Filter of [`Notification`]s in a list."]
    #[case = "lowercase"]
    enum Filter {
        #[doc = "Every [`Notification`]."]
        All = 1,

        #[doc = "[`Notification`]s not read yet."]
        Unread = 2,

        #[doc = "Urgent [`Notification`]s."]
        Urgent = 3,
    }
}

impl Default for Filter {
    fn default() -> Self {
        Self::All
    }
}

impl Filter {
    /// Checks whether the provided [`Notification`] passes this [`Filter`].
    #[must_use]
    pub fn matches(self, notification: &Notification) -> bool {
        match self {
            Self::All => true,
            Self::Unread => !notification.is_read,
            Self::Urgent => notification.is_urgent,
        }
    }
}

/// Relative rendering of a [`Notification`] delivery time.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Timestamp {
    /// Delivered less than a day ago, rendered as a local time of day.
    Time {
        /// Local hour.
        hour: u8,

        /// Local minute.
        minute: u8,
    },

    /// Delivered a day ago.
    Yesterday,

    /// Delivered earlier, rendered as a local [`Date`].
    Date(Date),
}

impl Timestamp {
    /// Renders the provided delivery [`DateTime`] relatively to `now` in
    /// the provided local [`UtcOffset`].
    ///
    /// Deliveries from the future are treated as recent ones.
    #[must_use]
    pub fn of<Of: ?Sized>(
        date: DateTimeOf<Of>,
        now: DateTime,
        offset: UtcOffset,
    ) -> Self {
        let age = now - date.coerce();
        if age < Duration::DAY {
            let local = date.to_local(offset);
            Self::Time {
                hour: local.hour(),
                minute: local.minute(),
            }
        } else if age < Duration::DAY * 2 {
            Self::Yesterday
        } else {
            Self::Date(date.to_local(offset).date().into())
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Time { hour, minute } => write!(f, "{hour:02}:{minute:02}"),
            Self::Yesterday => write!(f, "Yesterday"),
            Self::Date(date) => write!(f, "{date}"),
        }
    }
}

#[cfg(test)]
pub(crate) mod spec {
    use common::DateTime;
    use time::UtcOffset;

    use super::{Filter, Notification, Timestamp};

    /// Returns `count` [`Notification`]s, with the `urgent` ones flagged and
    /// every even one read.
    pub(crate) fn notifications(
        count: usize,
        urgent: &[usize],
    ) -> Vec<Notification> {
        (0..count)
            .map(|n| Notification {
                id: n.to_string().into(),
                title: format!("Notice #{n}"),
                content: "Rent is due".into(),
                kind: "payment".to_owned().into(),
                date: DateTime::from_rfc3339("2026-03-01T12:00:00Z")
                    .unwrap()
                    .coerce(),
                is_read: n % 2 == 0,
                is_urgent: urgent.contains(&n),
            })
            .collect()
    }

    #[test]
    fn filters() {
        let list = notifications(5, &[1, 4]);
        let ids = |f: Filter| {
            list.iter()
                .filter(|n| f.matches(n))
                .map(|n| n.id.to_string())
                .collect::<Vec<_>>()
        };

        assert_eq!(ids(Filter::default()).len(), 5);
        assert_eq!(ids(Filter::Urgent), ["1", "4"]);
        assert_eq!(ids(Filter::Unread), ["1", "3"]);
        assert_eq!("urgent".parse::<Filter>().unwrap(), Filter::Urgent);
    }

    #[test]
    fn timestamps() {
        let now = DateTime::from_rfc3339("2026-03-10T12:00:00Z").unwrap();
        let offset = UtcOffset::from_hms(2, 0, 0).unwrap();
        let at = |s: &str| DateTime::from_rfc3339(s).unwrap();

        let recent = Timestamp::of(at("2026-03-10T08:05:00Z"), now, offset);
        assert_eq!(recent, Timestamp::Time { hour: 10, minute: 5 });
        assert_eq!(recent.to_string(), "10:05");

        let yesterday = Timestamp::of(at("2026-03-09T11:59:00Z"), now, offset);
        assert_eq!(yesterday.to_string(), "Yesterday");

        let old = Timestamp::of(at("2026-03-08T11:59:00Z"), now, offset);
        assert_eq!(old.to_string(), "2026-03-08");

        let ahead = Timestamp::of(at("2026-03-10T13:00:00Z"), now, offset);
        assert_eq!(ahead.to_string(), "15:00");
    }

    #[test]
    fn decodes_numeric_and_string_ids() {
        let json = r#"[
            {"id": 7, "title": "A", "type": "lease",
             "date": "2026-03-01T12:00:00Z", "isUrgent": true},
            {"id": "n-8", "title": "B", "content": "c", "type": "payment",
             "date": "2026-03-01T12:00:00.000Z", "isRead": true}
        ]"#;
        let list: Vec<Notification> = serde_json::from_str(json).unwrap();

        assert_eq!(list[0].id.as_ref(), "7");
        assert!(list[0].is_urgent && !list[0].is_read);
        assert_eq!(list[1].id.as_ref(), "n-8");
        assert_eq!(list[1].kind.as_ref(), "payment");
    }
}
