use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::BookingError;

/// Seats are numbered 1..=TOTAL_SEATS on every vehicle.
pub const TOTAL_SEATS: i32 = 30;

/// Departure slots offered on every route, serialized as the
/// `HH:MM:SS` strings clients send and receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Departure {
    #[serde(rename = "06:00:00")]
    Morning,
    #[serde(rename = "14:00:00")]
    Afternoon,
    #[serde(rename = "21:00:00")]
    Evening,
}

impl Departure {
    pub fn as_str(&self) -> &'static str {
        match self {
            Departure::Morning => "06:00:00",
            Departure::Afternoon => "14:00:00",
            Departure::Evening => "21:00:00",
        }
    }

    pub fn time(&self) -> NaiveTime {
        let hour = match self {
            Departure::Morning => 6,
            Departure::Afternoon => 14,
            Departure::Evening => 21,
        };
        NaiveTime::from_hms_opt(hour, 0, 0).unwrap()
    }

    /// The departure instant for a given travel date.
    pub fn departs_at(&self, travel_date: NaiveDate) -> DateTime<Utc> {
        travel_date.and_time(self.time()).and_utc()
    }
}

impl FromStr for Departure {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "06:00:00" => Ok(Departure::Morning),
            "14:00:00" => Ok(Departure::Afternoon),
            "21:00:00" => Ok(Departure::Evening),
            other => Err(BookingError::Validation(format!(
                "Invalid departure time: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Reserved,
    Booked,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Reserved => "reserved",
            BookingStatus::Booked => "booked",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub user_id: i32,
    pub seat_number: i32,
    #[serde(rename = "travelDate")]
    pub travel_date: NaiveDate,
    pub departure: Departure,
    pub destination: String,
    pub status: BookingStatus,
    pub reserved_until: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

pub fn valid_seat(seat_number: i32) -> bool {
    (1..=TOTAL_SEATS).contains(&seat_number)
}

/// Seats still open for a trip, given the seat numbers already held or booked.
pub fn available_seats(occupied: &[i32]) -> Vec<i32> {
    (1..=TOTAL_SEATS)
        .filter(|seat| !occupied.contains(seat))
        .collect()
}

/// When a hold placed at `now` should lapse. Holds never outlive the
/// departure itself, and `None` means the trip has already departed.
pub fn hold_expiry(
    now: DateTime<Utc>,
    travel_date: NaiveDate,
    departure: Departure,
    hold_seconds: i64,
) -> Option<DateTime<Utc>> {
    let departs = departure.departs_at(travel_date);
    if departs <= now {
        return None;
    }
    Some(departs.min(now + Duration::seconds(hold_seconds)))
}

// Request fields are optional so handlers can report missing ones with
// the 400 payloads clients expect, rather than an extractor rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableSeatsQuery {
    #[serde(rename = "travelDate")]
    pub travel_date: Option<NaiveDate>,
    pub departure: Option<String>,
    pub destination: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReserveSeatRequest {
    pub seat_number: Option<i32>,
    #[serde(rename = "travelDate")]
    pub travel_date: Option<NaiveDate>,
    pub departure: Option<String>,
    pub destination: Option<String>,
    pub user_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReserveSeatResponse {
    pub message: String,
    #[serde(rename = "reservedUntil")]
    pub reserved_until: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSeatRequest {
    pub user_id: Option<i32>,
    pub seat_number: Option<i32>,
    #[serde(rename = "travelDate")]
    pub travel_date: Option<NaiveDate>,
    pub departure: Option<String>,
    pub destination: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSeatResponse {
    pub message: String,
}
