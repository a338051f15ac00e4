use chrono::{DateTime, NaiveDate, Utc};
use mockall::mock;

use crate::models::{DbAccount, DbBooking, DbCountry, DbProfile, DbReportRow, DbUserDetails};

// Mock repositories for testing
mock! {
    pub BookingRepo {
        pub async fn active_seat_numbers(
            &self,
            travel_date: NaiveDate,
            departure: &'static str,
            destination: &'static str,
            now: DateTime<Utc>,
        ) -> eyre::Result<Vec<i32>>;

        pub async fn reserve_seat(
            &self,
            user_id: i32,
            seat_number: i32,
            travel_date: NaiveDate,
            departure: &'static str,
            destination: &'static str,
            reserved_until: DateTime<Utc>,
            now: DateTime<Utc>,
        ) -> eyre::Result<Option<DbBooking>>;

        pub async fn confirm_seat(
            &self,
            user_id: i32,
            seat_number: i32,
            travel_date: NaiveDate,
            departure: &'static str,
            destination: &'static str,
            now: DateTime<Utc>,
        ) -> eyre::Result<Option<DbBooking>>;

        pub async fn bookings_between(
            &self,
            start_date: NaiveDate,
            end_date: NaiveDate,
            now: DateTime<Utc>,
        ) -> eyre::Result<Vec<DbReportRow>>;

        pub async fn delete_expired_holds(
            &self,
            now: DateTime<Utc>,
        ) -> eyre::Result<u64>;
    }
}

mock! {
    pub AccountRepo {
        pub async fn create_account(
            &self,
            first_name: &'static str,
            last_name: &'static str,
            email: &'static str,
            password_hash: &'static str,
        ) -> eyre::Result<Option<DbAccount>>;

        pub async fn get_account_by_email(
            &self,
            email: &'static str,
        ) -> eyre::Result<Option<DbAccount>>;

        pub async fn update_password(
            &self,
            email: &'static str,
            password_hash: &'static str,
        ) -> eyre::Result<bool>;

        pub async fn create_profile(
            &self,
            user_id: i32,
            age: Option<i32>,
            date_of_birth: Option<NaiveDate>,
            gender: Option<&'static str>,
            address: Option<&'static str>,
            mobile_number: &'static str,
            country: Option<&'static str>,
        ) -> eyre::Result<Option<DbProfile>>;

        pub async fn user_details_by_email(
            &self,
            email: &'static str,
        ) -> eyre::Result<Option<DbUserDetails>>;

        pub async fn profile_name_by_user_id(
            &self,
            user_id: i32,
        ) -> eyre::Result<Option<String>>;
    }
}

mock! {
    pub CountryRepo {
        pub async fn list_countries(&self) -> eyre::Result<Vec<DbCountry>>;

        pub async fn country_names(&self) -> eyre::Result<Vec<String>>;
    }
}
