pub mod account;
pub mod auth;
pub mod booking;
pub mod contact;
pub mod country;
pub mod report;
