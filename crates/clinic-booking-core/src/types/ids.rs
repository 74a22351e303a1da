// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct AccountId(i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct PractitionerId(i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct BookingId(i64);

fn validate_id(kind: &'static str, value: i64) -> Result<i64> {
    if value <= 0 {
        return Err(Error::invalid_field(kind, "must be a positive integer"));
    }
    Ok(value)
}

macro_rules! impl_id_traits {
    ($name:ident, $kind:literal) => {
        impl $name {
            pub fn new(value: i64) -> Result<Self> {
                validate_id($kind, value).map(Self)
            }

            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<i64> for $name {
            type Error = Error;

            fn try_from(value: i64) -> Result<Self> {
                Self::new(value)
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                let value = s
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| Error::invalid_field($kind, "must be an integer"))?;
                Self::new(value)
            }
        }
    };
}

impl_id_traits!(AccountId, "account_id");
impl_id_traits!(PractitionerId, "doctor_id");
impl_id_traits!(BookingId, "appointment_id");
