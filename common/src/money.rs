//! [`Money`]-related definitions.

use std::{fmt, str::FromStr};

use rust_decimal::{prelude::ToPrimitive as _, Decimal};

use crate::define_kind;

/// Amount of money in some [`Currency`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Money {
    /// Amount of this [`Money`].
    pub amount: Decimal,

    /// [`Currency`] of this amount.
    pub currency: Currency,
}

impl Money {
    /// Zero US dollars.
    pub const ZERO: Self = Self::usd(Decimal::ZERO);

    /// Creates a new [`Money`] amount in US dollars.
    #[must_use]
    pub const fn usd(amount: Decimal) -> Self {
        Self {
            amount,
            currency: Currency::Usd,
        }
    }

    /// Shifts this [`Money`] by the provided `delta`, keeping its
    /// [`Currency`].
    ///
    /// [`None`] is returned on overflow.
    #[must_use]
    pub fn checked_add(self, delta: Decimal) -> Option<Self> {
        Some(Self {
            amount: self.amount.checked_add(delta)?,
            currency: self.currency,
        })
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { amount, currency } = self;
        match amount.is_integer().then(|| amount.to_i128()).flatten() {
            Some(whole) => write!(f, "{whole}{currency}"),
            None => write!(f, "{}{currency}", amount.normalize()),
        }
    }
}

impl FromStr for Money {
    type Err = &'static str;

    /// Parses either a `{amount}{currency}` string, or a bare amount in US
    /// dollars (optionally prefixed with `$`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("empty");
        }

        let (amount, currency) = match s.len().checked_sub(3) {
            Some(at) if s.is_char_boundary(at)
                && s[at..].bytes().all(|b| b.is_ascii_alphabetic()) =>
            {
                let (amount, code) = s.split_at(at);
                let currency = Currency::from_str(code)
                    .map_err(|_| "invalid currency")?;
                (amount, currency)
            }
            _ => (s.strip_prefix('$').unwrap_or(s), Currency::Usd),
        };
        let amount = Decimal::from_str(amount.trim())
            .map_err(|_| "invalid amount")?;

        Ok(Self { amount, currency })
    }
}

define_kind! {
    #[doc = "Currency of a [`Money`] amount."]
    #[case = "UPPERCASE"]
    enum Currency {
        #[doc = "US Dollar."]
        Usd = 1,

        #[doc = "Euro."]
        Eur = 2,

        #[doc = "Pound Sterling."]
        Gbp = 3,
    }
}

#[cfg(feature = "serde")]
pub mod serde {
    //! Module providing integration with [`serde`] crate.

    pub mod dollars {
        //! Module providing serialization and deserialization of [`Money`] as
        //! a plain JSON number of US dollars, the way the backend API speaks.
        //!
        //! [`Money`]: super::super::Money

        use rust_decimal::{prelude::ToPrimitive as _, Decimal};
        use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

        use super::super::Money;

        /// Raw amount accepted on input.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Amount {
            /// JSON integer.
            Int(i64),

            /// JSON floating-point number.
            Float(f64),

            /// Decimal string.
            Str(String),
        }

        /// Serializes the [`Money`] amount as a number.
        ///
        /// # Errors
        ///
        /// Returns an error if the amount cannot be represented as a number.
        pub fn serialize<S>(money: &Money, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            use serde::ser::Error as _;

            if money.amount.is_integer() {
                if let Some(whole) = money.amount.to_i64() {
                    return serializer.serialize_i64(whole);
                }
            }
            let float = money.amount.to_f64().ok_or_else(|| {
                S::Error::custom(format!("`{}` is not representable", money))
            })?;
            serializer.serialize_f64(float)
        }

        /// Deserializes a number (or decimal string) into a [`Money`] amount in
        /// US dollars.
        ///
        /// # Errors
        ///
        /// Returns an error if the value is not a finite number.
        pub fn deserialize<'de, D>(deserializer: D) -> Result<Money, D::Error>
        where
            D: Deserializer<'de>,
        {
            let amount = match Amount::deserialize(deserializer)? {
                Amount::Int(i) => Decimal::from(i),
                Amount::Float(f) => Decimal::try_from(f)
                    .map_err(|e| D::Error::custom(format!("invalid amount: {e}")))?,
                Amount::Str(s) => s
                    .trim()
                    .parse()
                    .map_err(|e| D::Error::custom(format!("invalid amount: {e}")))?,
            };
            Ok(Money::usd(amount))
        }

        pub mod option {
            //! Optional version of the [`dollars`] module.
            //!
            //! [`dollars`]: super

            use serde::{Deserialize, Deserializer, Serializer};

            use super::Money;

            /// Helper wrapper applying [`dollars`] to an inner value.
            ///
            /// [`dollars`]: super
            #[derive(Deserialize)]
            struct Wrapped(#[serde(with = "super")] Money);

            /// Serializes the optional [`Money`] amount as a number or `null`.
            ///
            /// # Errors
            ///
            /// Returns an error if the amount cannot be represented as a
            /// number.
            pub fn serialize<S>(
                money: &Option<Money>,
                serializer: S,
            ) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                match money {
                    Some(m) => super::serialize(m, serializer),
                    None => serializer.serialize_none(),
                }
            }

            /// Deserializes an optional number into a [`Money`] amount.
            ///
            /// # Errors
            ///
            /// Returns an error if the value is neither `null` nor a finite
            /// number.
            pub fn deserialize<'de, D>(
                deserializer: D,
            ) -> Result<Option<Money>, D::Error>
            where
                D: Deserializer<'de>,
            {
                Ok(Option::<Wrapped>::deserialize(deserializer)?.map(|w| w.0))
            }
        }
    }
}
