//! [`Lease`] definitions.

pub mod draft;
pub mod renewal;

use std::collections::BTreeSet;

use common::{define_kind, money, Date, DateTime, Money};
use derive_more::{AsRef, Display, From, FromStr, Into};
use itertools::Itertools as _;
use serde::{Deserialize, Serialize};

pub use self::{draft::Draft, renewal::Renewal};

/// Rental agreement between a tenant and a property.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lease {
    /// ID of this [`Lease`].
    pub id: Id,

    /// [`PropertyName`] of the rented property.
    pub property_name: PropertyName,

    /// [`TenantName`] of the renting tenant.
    pub tenant_name: TenantName,

    /// [`Date`] this [`Lease`] starts at.
    pub start_date: Date,

    /// [`Date`] this [`Lease`] ends at.
    pub end_date: Date,

    /// Rent to be paid every month.
    #[serde(with = "money::serde::dollars")]
    pub monthly_rent: Money,

    /// Deposit paid at the beginning of this [`Lease`].
    #[serde(with = "money::serde::dollars")]
    pub security_deposit: Money,

    /// [`Kind`] of this [`Lease`].
    #[serde(rename = "type")]
    pub kind: Kind,

    /// [`Status`] of this [`Lease`].
    pub status: Status,

    /// [`Terms`] of this [`Lease`].
    pub terms: Terms,

    /// [`PaymentSchedule`] of this [`Lease`].
    pub payment_schedule: PaymentSchedule,

    /// [`Document`]s attached to this [`Lease`].
    #[serde(default)]
    pub documents: Vec<Document>,

    /// Notes left on the last renewal of this [`Lease`], if it was renewed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renewal_notes: Option<String>,
}

impl Lease {
    /// Returns the number of calendar days left until this [`Lease`] ends.
    ///
    /// Partial days are rounded up. A negative value means this [`Lease`]
    /// ended that many days ago.
    #[must_use]
    pub fn days_remaining(&self, now: DateTime) -> i64 {
        now.days_until(self.end_date)
    }

    /// Indicates whether this [`Lease`] awaits a [`Renewal`].
    #[must_use]
    pub fn is_pending_renewal(&self) -> bool {
        self.status == Status::PendingRenewal
    }

    /// Returns a copy of this [`Lease`] with the provided [`Renewal`]
    /// applied.
    ///
    /// [`None`] is returned if the adjusted rent overflows.
    #[must_use]
    pub fn renewed(&self, renewal: Renewal) -> Option<Self> {
        let Renewal {
            end_date,
            rent_increase,
            notes,
        } = renewal;

        Some(Self {
            end_date,
            monthly_rent: self.monthly_rent.checked_add(rent_increase)?,
            status: Status::Active,
            renewal_notes: Some(notes),
            ..self.clone()
        })
    }
}

/// ID of a [`Lease`].
///
/// Generated on the client out of the creation timestamp.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub struct Id(i64);

impl Id {
    /// Generates a new [`Id`] out of the provided creation [`DateTime`].
    #[must_use]
    pub fn generate(at: DateTime) -> Self {
        Self(at.unix_timestamp_millis())
    }
}

/// Name of a property a [`Lease`] is signed for.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq, Serialize)]
#[as_ref(str, String)]
#[serde(transparent)]
pub struct PropertyName(String);

impl PropertyName {
    /// Creates a new [`PropertyName`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        check_name(&name).then_some(Self(name))
    }
}

/// Name of a tenant a [`Lease`] is signed with.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq, Serialize)]
#[as_ref(str, String)]
#[serde(transparent)]
pub struct TenantName(String);

impl TenantName {
    /// Creates a new [`TenantName`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        check_name(&name).then_some(Self(name))
    }
}

/// Checks whether the given `name` is a valid [`PropertyName`] or
/// [`TenantName`].
fn check_name(name: &str) -> bool {
    name.trim() == name && !name.is_empty() && name.len() <= 512
}

/// Implements [`FromStr`] and validating [`Deserialize`] for a name type.
///
/// [`FromStr`]: std::str::FromStr
macro_rules! impl_name {
    ($($name:ident),*) => {$(
        impl std::str::FromStr for $name {
            type Err = &'static str;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s).ok_or(concat!("invalid `", stringify!($name), "`"))
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                use serde::de::Error as _;

                String::deserialize(deserializer)?
                    .parse()
                    .map_err(D::Error::custom)
            }
        }
    )*};
}

impl_name!(PropertyName, TenantName);

define_kind! {
    #[doc = "Kind of a [`Lease`]."]
    #[case = "PascalCase"]
    enum Kind {
        #[doc = "[`Lease`] for a fixed term."]
        FixedTerm = 1,

        #[doc = "[`Lease`] renewed every month."]
        MonthToMonth = 2,
    }
}

define_kind! {
    #[doc = "Status of a [`Lease`]."]
    #[case = "PascalCase"]
    enum Status {
        #[doc = "[`Lease`] is in force."]
        Active = 1,

        #[doc = "[`Lease`] is about to end and awaits a [`Renewal`]."]
        PendingRenewal = 2,

        #[doc = "[`Lease`] has ended."]
        Expired = 3,
    }
}

/// Terms of a [`Lease`].
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Terms {
    /// Indicator whether pets are allowed on the property.
    pub pets_allowed: bool,

    /// Deposit paid for pets, if any.
    #[serde(default, with = "money::serde::dollars::option")]
    pub pet_deposit: Option<Money>,

    /// Number of parking spaces included.
    #[serde(default)]
    pub parking_spaces: u16,

    /// Utilities included into the rent.
    #[serde(default)]
    pub utilities: BTreeSet<String>,
}

impl Terms {
    /// Returns the included utilities as a comma-joined list.
    #[must_use]
    pub fn utilities_list(&self) -> String {
        self.utilities.iter().join(", ")
    }
}

/// Payment schedule of a [`Lease`].
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSchedule {
    /// Day of month the rent is due at.
    #[serde(rename = "dueDate")]
    pub due_day: DueDay,

    /// Fee charged for a late payment.
    #[serde(with = "money::serde::dollars")]
    pub late_fee_amount: Money,

    /// Number of days after the [`DueDay`] the late fee is charged.
    pub late_fee_after: u16,
}

/// Day of month (`1..=31`) rent is due at.
#[derive(
    Clone, Copy, Debug, Display, Eq, Into, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
pub struct DueDay(u8);

impl DueDay {
    /// Creates a new [`DueDay`] if the given `day` is a valid day of month.
    #[must_use]
    pub fn new(day: u8) -> Option<Self> {
        (1..=31).contains(&day).then_some(Self(day))
    }
}

impl<'de> Deserialize<'de> for DueDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error as _;

        let day = u8::deserialize(deserializer)?;
        Self::new(day).ok_or_else(|| D::Error::custom("invalid `DueDay`"))
    }
}

/// Opaque reference (file name or URL) to a document attached to a
/// [`Lease`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, From, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[serde(transparent)]
pub struct Document(String);
