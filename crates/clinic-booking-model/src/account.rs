// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use clinic_booking_core::{AccountId, Error, Result};
use serde::{Deserialize, Serialize};

pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 32;
pub const PASSWORD_MIN_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Patient,
    Admin,
}

impl Role {
    pub fn parse(input: &str) -> Result<Self> {
        match input.trim() {
            "patient" => Ok(Self::Patient),
            "admin" => Ok(Self::Admin),
            _ => Err(Error::invalid_field(
                "role",
                "allowed values: admin, patient",
            )),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Patient => "patient",
            Self::Admin => "admin",
        }
    }

    /// Administrators manage the clinic; they never hold bookings themselves.
    #[must_use]
    pub const fn may_book(self) -> bool {
        matches!(self, Self::Patient)
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A registered user. The credential hash stays inside the store and never
/// appears on this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub phone: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub phone: String,
    pub role: Role,
}

impl NewAccount {
    pub fn validate(&self) -> Result<()> {
        validate_username(&self.username)?;
        validate_email(&self.email)?;
        validate_password(&self.password)?;
        if self.full_name.trim().is_empty() {
            return Err(Error::invalid_field("full_name", "must not be empty"));
        }
        if self.phone.trim().is_empty() {
            return Err(Error::invalid_field("phone", "must not be empty"));
        }
        Ok(())
    }
}

pub fn validate_username(input: &str) -> Result<()> {
    let len = input.chars().count();
    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) {
        return Err(Error::invalid_field(
            "username",
            format!("must be {USERNAME_MIN_LEN}..={USERNAME_MAX_LEN} characters"),
        ));
    }
    if !input
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-')
    {
        return Err(Error::invalid_field(
            "username",
            "must contain only [A-Za-z0-9_.-]",
        ));
    }
    Ok(())
}

pub fn validate_email(input: &str) -> Result<()> {
    let Some((local, domain)) = input.split_once('@') else {
        return Err(Error::invalid_field("email", "must contain '@'"));
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(Error::invalid_field("email", "must look like name@domain"));
    }
    if input.chars().any(char::is_whitespace) {
        return Err(Error::invalid_field("email", "must not contain whitespace"));
    }
    Ok(())
}

pub fn validate_password(input: &str) -> Result<()> {
    if input.chars().count() < PASSWORD_MIN_LEN {
        return Err(Error::invalid_field(
            "password",
            format!("must be at least {PASSWORD_MIN_LEN} characters"),
        ));
    }
    Ok(())
}

pub fn parse_birth_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| Error::invalid_field("birth_date", "expected YYYY-MM-DD"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> NewAccount {
        NewAccount {
            username: "maria".to_string(),
            email: "maria@example.com".to_string(),
            password: "secret1".to_string(),
            full_name: "Maria Ivanova".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1990, 1, 1).expect("date"),
            phone: "+7-999-000-00-00".to_string(),
            role: Role::Patient,
        }
    }

    #[test]
    fn role_parsing_is_strict() {
        assert_eq!(Role::parse("admin").expect("admin"), Role::Admin);
        assert!(Role::parse("doctor").is_err());
        assert!(Role::parse("Admin").is_err());
        assert!(!Role::Admin.may_book());
        assert!(Role::Patient.may_book());
    }

    #[test]
    fn new_account_validation() {
        assert!(draft().validate().is_ok());

        let mut short = draft();
        short.username = "ab".to_string();
        assert!(short.validate().is_err());

        let mut bad_email = draft();
        bad_email.email = "maria.example.com".to_string();
        assert!(bad_email.validate().is_err());

        let mut weak = draft();
        weak.password = "123".to_string();
        assert!(weak.validate().is_err());
    }

    #[test]
    fn birth_date_requires_iso_format() {
        assert!(parse_birth_date("1990-01-31").is_ok());
        assert!(parse_birth_date("31.01.1990").is_err());
    }
}
