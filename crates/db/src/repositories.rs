pub mod account;
pub mod booking;
pub mod country;
