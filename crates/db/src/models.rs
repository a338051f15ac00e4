use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAccount {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbProfile {
    pub user_id: i32,
    pub age: Option<i32>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub mobile_number: String,
    pub country: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCountry {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBooking {
    pub id: Uuid,
    pub user_id: i32,
    pub seat_number: i32,
    pub travel_date: NaiveDate,
    pub departure: String,
    pub destination: String,
    pub status: String,
    pub reserved_until: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

// Row shape for the user details join across accounts and profiles.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUserDetails {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub mobile_number: String,
    pub country: Option<String>,
    pub user_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbReportRow {
    pub id: Uuid,
    pub full_name: String,
    pub seat_number: i32,
    pub destination: String,
    pub travel_date: NaiveDate,
}
