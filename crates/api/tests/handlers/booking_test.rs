use axum::Json;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use mockall::predicate;
use transitbook_core::{
    errors::BookingError,
    models::booking::{
        available_seats, hold_expiry, valid_seat, BookSeatResponse, Departure,
        ReserveSeatResponse, TOTAL_SEATS,
    },
};
use transitbook_db::models::DbBooking;
use uuid::Uuid;

use crate::test_utils::TestContext;
use transitbook_api::middleware::error_handling::AppError;

// Create test wrappers for handlers that directly test what we want
async fn test_available_seats_wrapper(
    ctx: &mut TestContext,
    travel_date: NaiveDate,
    departure: Departure,
    destination: &'static str,
    now: DateTime<Utc>,
) -> Result<Json<Vec<i32>>, AppError> {
    // This replaces the real DB calls with our mocks
    let occupied = ctx
        .booking_repo
        .active_seat_numbers(travel_date, departure.as_str(), destination, now)
        .await?;

    Ok(Json(available_seats(&occupied)))
}

async fn test_reserve_seat_wrapper(
    ctx: &mut TestContext,
    user_id: i32,
    seat_number: i32,
    travel_date: NaiveDate,
    departure: Departure,
    destination: &'static str,
    hold_seconds: i64,
    now: DateTime<Utc>,
) -> Result<Json<ReserveSeatResponse>, AppError> {
    if !valid_seat(seat_number) {
        return Err(AppError(BookingError::Validation(format!(
            "Seat number must be between 1 and {}",
            TOTAL_SEATS
        ))));
    }

    // A hold never outlives the departure, and departed trips take no holds
    let Some(reserved_until) = hold_expiry(now, travel_date, departure, hold_seconds) else {
        return Err(AppError(BookingError::Validation(
            "Cannot reserve a seat on a trip that has already departed".to_string(),
        )));
    };

    let reserved = ctx
        .booking_repo
        .reserve_seat(
            user_id,
            seat_number,
            travel_date,
            departure.as_str(),
            destination,
            reserved_until,
            now,
        )
        .await?
        .ok_or_else(|| {
            BookingError::SeatUnavailable(format!("Seat {} is already taken", seat_number))
        })?;

    Ok(Json(ReserveSeatResponse {
        message: "Seat reserved successfully".to_string(),
        reserved_until: reserved.reserved_until.unwrap_or(reserved_until),
    }))
}

async fn test_book_seat_wrapper(
    ctx: &mut TestContext,
    user_id: i32,
    seat_number: i32,
    travel_date: NaiveDate,
    departure: Departure,
    destination: &'static str,
    now: DateTime<Utc>,
) -> Result<Json<BookSeatResponse>, AppError> {
    ctx.booking_repo
        .confirm_seat(
            user_id,
            seat_number,
            travel_date,
            departure.as_str(),
            destination,
            now,
        )
        .await?
        .ok_or_else(|| {
            BookingError::SeatNotReserved("Seat is not reserved or already booked".to_string())
        })?;

    Ok(Json(BookSeatResponse {
        message: "Seat booked successfully".to_string(),
    }))
}

fn trip_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()
}

fn db_booking(
    user_id: i32,
    seat_number: i32,
    status: &str,
    reserved_until: Option<DateTime<Utc>>,
) -> DbBooking {
    DbBooking {
        id: Uuid::new_v4(),
        user_id,
        seat_number,
        travel_date: trip_date(),
        departure: Departure::Morning.as_str().to_string(),
        destination: "France".to_string(),
        status: status.to_string(),
        reserved_until,
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_available_seats_excludes_active_holds_and_bookings() {
    let mut ctx = TestContext::new();
    let travel_date = trip_date();
    let now = Utc::now();

    // The repository only reports seats that are booked or still held
    ctx.booking_repo
        .expect_active_seat_numbers()
        .with(
            predicate::eq(travel_date),
            predicate::eq("06:00:00"),
            predicate::eq("France"),
            predicate::eq(now),
        )
        .returning(|_, _, _, _| Ok(vec![1, 15, 30]));

    let result =
        test_available_seats_wrapper(&mut ctx, travel_date, Departure::Morning, "France", now)
            .await;

    assert!(result.is_ok());
    let seats = result.unwrap().0;
    assert_eq!(seats.len(), 27);
    assert!(!seats.contains(&1));
    assert!(!seats.contains(&15));
    assert!(!seats.contains(&30));
}

#[tokio::test]
async fn test_available_seats_on_an_empty_trip() {
    let mut ctx = TestContext::new();
    let travel_date = trip_date();
    let now = Utc::now();

    ctx.booking_repo
        .expect_active_seat_numbers()
        .returning(|_, _, _, _| Ok(vec![]));

    let result =
        test_available_seats_wrapper(&mut ctx, travel_date, Departure::Evening, "Japan", now)
            .await;

    assert!(result.is_ok());
    let seats = result.unwrap().0;
    assert_eq!(seats.len(), TOTAL_SEATS as usize);
    assert_eq!(seats.first(), Some(&1));
    assert_eq!(seats.last(), Some(&TOTAL_SEATS));
}

#[tokio::test]
async fn test_reserve_seat_success() {
    let mut ctx = TestContext::new();
    let travel_date = trip_date();
    let now = travel_date.and_hms_opt(0, 0, 0).unwrap().and_utc();
    let expiry = now + Duration::seconds(300);

    // The handler computes the deadline; the repository gets it verbatim
    ctx.booking_repo
        .expect_reserve_seat()
        .with(
            predicate::eq(7),
            predicate::eq(12),
            predicate::eq(travel_date),
            predicate::eq("06:00:00"),
            predicate::eq("France"),
            predicate::eq(expiry),
            predicate::eq(now),
        )
        .returning(|user_id, seat_number, _, _, _, reserved_until, _| {
            Ok(Some(db_booking(
                user_id,
                seat_number,
                "reserved",
                Some(reserved_until),
            )))
        });

    let result = test_reserve_seat_wrapper(
        &mut ctx,
        7,
        12,
        travel_date,
        Departure::Morning,
        "France",
        300,
        now,
    )
    .await;

    assert!(result.is_ok());
    let response = result.unwrap().0;
    assert_eq!(response.message, "Seat reserved successfully");
    assert_eq!(response.reserved_until, expiry);
}

#[tokio::test]
async fn test_reserve_seat_already_taken() {
    let mut ctx = TestContext::new();
    let travel_date = trip_date();
    let now = travel_date.and_hms_opt(0, 0, 0).unwrap().and_utc();

    // A conditional insert that claims nothing means the seat is taken
    ctx.booking_repo
        .expect_reserve_seat()
        .returning(|_, _, _, _, _, _, _| Ok(None));

    let result = test_reserve_seat_wrapper(
        &mut ctx,
        7,
        12,
        travel_date,
        Departure::Morning,
        "France",
        300,
        now,
    )
    .await;

    assert!(result.is_err());
    match result.unwrap_err().0 {
        BookingError::SeatUnavailable(message) => {
            assert_eq!(message, "Seat 12 is already taken");
        }
        e => panic!("Expected SeatUnavailable error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_reserve_seat_lost_race_reports_conflict() {
    let mut ctx = TestContext::new();
    let travel_date = trip_date();
    let now = travel_date.and_hms_opt(0, 0, 0).unwrap().and_utc();

    // Two riders go for the same seat; the store admits exactly one
    ctx.booking_repo
        .expect_reserve_seat()
        .with(
            predicate::eq(7),
            predicate::always(),
            predicate::always(),
            predicate::always(),
            predicate::always(),
            predicate::always(),
            predicate::always(),
        )
        .returning(|user_id, seat_number, _, _, _, reserved_until, _| {
            Ok(Some(db_booking(
                user_id,
                seat_number,
                "reserved",
                Some(reserved_until),
            )))
        });
    ctx.booking_repo
        .expect_reserve_seat()
        .with(
            predicate::eq(8),
            predicate::always(),
            predicate::always(),
            predicate::always(),
            predicate::always(),
            predicate::always(),
            predicate::always(),
        )
        .returning(|_, _, _, _, _, _, _| Ok(None));

    let winner = test_reserve_seat_wrapper(
        &mut ctx,
        7,
        5,
        travel_date,
        Departure::Afternoon,
        "France",
        300,
        now,
    )
    .await;
    let loser = test_reserve_seat_wrapper(
        &mut ctx,
        8,
        5,
        travel_date,
        Departure::Afternoon,
        "France",
        300,
        now,
    )
    .await;

    assert!(winner.is_ok());
    assert!(loser.is_err());
    match loser.unwrap_err().0 {
        BookingError::SeatUnavailable(_) => {} // Expected
        e => panic!("Expected SeatUnavailable error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_reserve_seat_rejects_out_of_range_seat() {
    let mut ctx = TestContext::new();
    let travel_date = trip_date();
    let now = travel_date.and_hms_opt(0, 0, 0).unwrap().and_utc();

    ctx.booking_repo
        .expect_reserve_seat()
        .times(0)
        .returning(|_, _, _, _, _, _, _| panic!("Should not be called"));

    for seat_number in [0, 31, -1] {
        let result = test_reserve_seat_wrapper(
            &mut ctx,
            7,
            seat_number,
            travel_date,
            Departure::Morning,
            "France",
            300,
            now,
        )
        .await;

        assert!(result.is_err());
        match result.unwrap_err().0 {
            BookingError::Validation(message) => {
                assert_eq!(message, "Seat number must be between 1 and 30");
            }
            e => panic!("Expected Validation error, got: {:?}", e),
        }
    }
}

#[tokio::test]
async fn test_reserve_seat_rejects_departed_trip() {
    let mut ctx = TestContext::new();
    let travel_date = trip_date();
    // An hour after the morning departure has left
    let now = travel_date.and_hms_opt(7, 0, 0).unwrap().and_utc();

    ctx.booking_repo
        .expect_reserve_seat()
        .times(0)
        .returning(|_, _, _, _, _, _, _| panic!("Should not be called"));

    let result = test_reserve_seat_wrapper(
        &mut ctx,
        7,
        12,
        travel_date,
        Departure::Morning,
        "France",
        300,
        now,
    )
    .await;

    assert!(result.is_err());
    match result.unwrap_err().0 {
        BookingError::Validation(message) => {
            assert_eq!(
                message,
                "Cannot reserve a seat on a trip that has already departed"
            );
        }
        e => panic!("Expected Validation error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_reserve_seat_hold_capped_at_departure() {
    let mut ctx = TestContext::new();
    let travel_date = trip_date();
    // Two minutes before departure, so the full hold window does not fit
    let now = travel_date.and_hms_opt(5, 58, 0).unwrap().and_utc();
    let departs = Departure::Morning.departs_at(travel_date);

    ctx.booking_repo
        .expect_reserve_seat()
        .with(
            predicate::eq(7),
            predicate::eq(12),
            predicate::eq(travel_date),
            predicate::eq("06:00:00"),
            predicate::eq("France"),
            predicate::eq(departs),
            predicate::eq(now),
        )
        .returning(|user_id, seat_number, _, _, _, reserved_until, _| {
            Ok(Some(db_booking(
                user_id,
                seat_number,
                "reserved",
                Some(reserved_until),
            )))
        });

    let result = test_reserve_seat_wrapper(
        &mut ctx,
        7,
        12,
        travel_date,
        Departure::Morning,
        "France",
        300,
        now,
    )
    .await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap().0.reserved_until, departs);
}

#[tokio::test]
async fn test_book_seat_success() {
    let mut ctx = TestContext::new();
    let travel_date = trip_date();
    let now = travel_date.and_hms_opt(0, 2, 0).unwrap().and_utc();

    ctx.booking_repo
        .expect_confirm_seat()
        .with(
            predicate::eq(7),
            predicate::eq(12),
            predicate::eq(travel_date),
            predicate::eq("06:00:00"),
            predicate::eq("France"),
            predicate::eq(now),
        )
        .returning(|user_id, seat_number, _, _, _, _| {
            Ok(Some(db_booking(user_id, seat_number, "booked", None)))
        });

    let result = test_book_seat_wrapper(
        &mut ctx,
        7,
        12,
        travel_date,
        Departure::Morning,
        "France",
        now,
    )
    .await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap().0.message, "Seat booked successfully");
}

#[tokio::test]
async fn test_book_seat_without_a_live_hold() {
    let mut ctx = TestContext::new();
    let travel_date = trip_date();
    let now = Utc::now();

    // Lapsed hold, someone else's hold, or no hold at all: same answer
    ctx.booking_repo
        .expect_confirm_seat()
        .returning(|_, _, _, _, _, _| Ok(None));

    let result = test_book_seat_wrapper(
        &mut ctx,
        8,
        12,
        travel_date,
        Departure::Morning,
        "France",
        now,
    )
    .await;

    assert!(result.is_err());
    match result.unwrap_err().0 {
        BookingError::SeatNotReserved(message) => {
            assert_eq!(message, "Seat is not reserved or already booked");
        }
        e => panic!("Expected SeatNotReserved error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_delete_expired_holds_reports_count() {
    let mut ctx = TestContext::new();
    let now = Utc::now();

    ctx.booking_repo
        .expect_delete_expired_holds()
        .with(predicate::eq(now))
        .returning(|_| Ok(3));

    let removed = ctx.booking_repo.delete_expired_holds(now).await.unwrap();
    assert_eq!(removed, 3);
}
