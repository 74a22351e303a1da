// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use clinic_booking_core::{AccountId, BookingId, ConflictKind, Error, PractitionerId, Result};
use serde::{Deserialize, Serialize};

/// Calendar date of an appointment, rendered as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AppointmentDate(NaiveDate);

impl AppointmentDate {
    pub fn parse(input: &str) -> Result<Self> {
        let s = input.trim();
        if s.len() != 10 {
            return Err(Error::invalid_field(
                "appointment_date",
                "expected YYYY-MM-DD",
            ));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| Error::invalid_field("appointment_date", "expected YYYY-MM-DD"))
    }

    #[must_use]
    pub const fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    #[must_use]
    pub const fn naive(self) -> NaiveDate {
        self.0
    }

    #[must_use]
    pub fn weekday(self) -> Weekday {
        self.0.weekday()
    }
}

impl Display for AppointmentDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<AppointmentDate> for String {
    fn from(value: AppointmentDate) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for AppointmentDate {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl FromStr for AppointmentDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Time-of-day slot start, rendered as zero-padded 24h `HH:MM`.
///
/// Ordering follows the clock, which also matches the lexical order of the
/// rendered form; the store relies on that for `ORDER BY appointment_time`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AppointmentTime {
    hour: u8,
    minute: u8,
}

impl AppointmentTime {
    pub fn new(hour: u8, minute: u8) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(Error::invalid_field(
                "appointment_time",
                "hour must be 00-23 and minute 00-59",
            ));
        }
        Ok(Self { hour, minute })
    }

    pub fn parse(input: &str) -> Result<Self> {
        let s = input.trim();
        let invalid = || Error::invalid_field("appointment_time", "expected HH:MM");
        let (h, m) = s.split_once(':').ok_or_else(invalid)?;
        if h.len() != 2 || m.len() != 2 || !h.bytes().chain(m.bytes()).all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        let hour = h.parse::<u8>().map_err(|_| invalid())?;
        let minute = m.parse::<u8>().map_err(|_| invalid())?;
        Self::new(hour, minute)
    }

    #[must_use]
    pub const fn hour(self) -> u8 {
        self.hour
    }

    #[must_use]
    pub const fn minute(self) -> u8 {
        self.minute
    }

    #[must_use]
    pub const fn minutes_since_midnight(self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }

    pub(crate) fn from_minutes(total: u16) -> Result<Self> {
        let hour = u8::try_from(total / 60)
            .map_err(|_| Error::invalid_field("appointment_time", "out of range"))?;
        let minute = u8::try_from(total % 60)
            .map_err(|_| Error::invalid_field("appointment_time", "out of range"))?;
        Self::new(hour, minute)
    }
}

impl Display for AppointmentTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl From<AppointmentTime> for String {
    fn from(value: AppointmentTime) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for AppointmentTime {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl FromStr for AppointmentTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Scheduled,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn parse(input: &str) -> Result<Self> {
        match input.trim() {
            "scheduled" => Ok(Self::Scheduled),
            "cancelled" => Ok(Self::Cancelled),
            "completed" => Ok(Self::Completed),
            _ => Err(Error::invalid_field(
                "status",
                "allowed values: scheduled, cancelled, completed",
            )),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }

    /// Only a scheduled booking moves, and only to a terminal status.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Scheduled, Self::Cancelled) | (Self::Scheduled, Self::Completed)
        )
    }

    pub fn transition_to(self, next: Self) -> Result<Self> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(ConflictKind::InvalidTransition {
                from: self.as_str().to_string(),
                to: next.as_str().to_string(),
            }
            .into())
        }
    }
}

impl Display for BookingStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The exclusivity key: at most one slot-holding booking per value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    pub practitioner_id: PractitionerId,
    pub appointment_date: AppointmentDate,
    pub appointment_time: AppointmentTime,
}

impl Slot {
    #[must_use]
    pub fn conflict(&self) -> ConflictKind {
        ConflictKind::SlotTaken {
            practitioner_id: self.practitioner_id.get(),
            appointment_date: self.appointment_date.to_string(),
            appointment_time: self.appointment_time.to_string(),
        }
    }
}

/// A complete, well-formed booking intent. Completeness and format are
/// checked when this is built; eligibility and existence are checked later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingRequest {
    pub practitioner_id: PractitionerId,
    pub appointment_date: AppointmentDate,
    pub appointment_time: AppointmentTime,
}

impl BookingRequest {
    #[must_use]
    pub const fn slot(&self) -> Slot {
        Slot {
            practitioner_id: self.practitioner_id,
            appointment_date: self.appointment_date,
            appointment_time: self.appointment_time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub account_id: AccountId,
    pub practitioner_id: PractitionerId,
    pub appointment_date: AppointmentDate,
    pub appointment_time: AppointmentTime,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    #[must_use]
    pub const fn slot(&self) -> Slot {
        Slot {
            practitioner_id: self.practitioner_id,
            appointment_date: self.appointment_date,
            appointment_time: self.appointment_time,
        }
    }
}

/// Booking joined with the practitioner display fields shown in history views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDetails {
    #[serde(flatten)]
    pub booking: Booking,
    pub doctor_name: String,
    pub doctor_specialization: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_parsing_is_strict() {
        assert_eq!(
            AppointmentDate::parse("2024-06-11").expect("date").to_string(),
            "2024-06-11"
        );
        assert!(AppointmentDate::parse("2024-6-11").is_err());
        assert!(AppointmentDate::parse("2024-02-30").is_err());
        assert!(AppointmentDate::parse("11.06.2024").is_err());
    }

    #[test]
    fn time_parsing_is_strict() {
        let t = AppointmentTime::parse("09:30").expect("time");
        assert_eq!((t.hour(), t.minute()), (9, 30));
        assert_eq!(t.to_string(), "09:30");
        assert!(AppointmentTime::parse("9:30").is_err());
        assert!(AppointmentTime::parse("24:00").is_err());
        assert!(AppointmentTime::parse("12:60").is_err());
        assert!(AppointmentTime::parse("12-30").is_err());
    }

    #[test]
    fn time_order_matches_rendered_order() {
        let a = AppointmentTime::parse("09:30").expect("a");
        let b = AppointmentTime::parse("10:00").expect("b");
        assert!(a < b);
        assert!(a.to_string() < b.to_string());
    }

    #[test]
    fn status_lifecycle() {
        use BookingStatus::*;
        assert!(Scheduled.can_transition_to(Cancelled));
        assert!(Scheduled.can_transition_to(Completed));
        assert!(!Cancelled.can_transition_to(Scheduled));
        assert!(!Completed.can_transition_to(Cancelled));
        assert!(!Scheduled.can_transition_to(Scheduled));
        assert!(Cancelled.transition_to(Completed).is_err());
    }

    #[test]
    fn wire_form_uses_canonical_field_names() {
        let booking = Booking {
            id: BookingId::new(1).expect("id"),
            account_id: AccountId::new(2).expect("id"),
            practitioner_id: PractitionerId::new(3).expect("id"),
            appointment_date: AppointmentDate::parse("2024-06-11").expect("date"),
            appointment_time: AppointmentTime::parse("09:00").expect("time"),
            status: BookingStatus::Scheduled,
            created_at: DateTime::<Utc>::from_timestamp(0, 0).expect("ts"),
        };
        let value = serde_json::to_value(&booking).expect("json");
        assert_eq!(value["appointment_date"], "2024-06-11");
        assert_eq!(value["appointment_time"], "09:00");
        assert_eq!(value["status"], "scheduled");
    }
}
