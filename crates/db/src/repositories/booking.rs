use crate::models::{DbBooking, DbReportRow};
use chrono::{DateTime, NaiveDate, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Seat numbers already taken for a trip: every booked seat plus every
/// hold that is still live at `now`. Expired holds are invisible here.
pub async fn active_seat_numbers(
    pool: &Pool<Postgres>,
    travel_date: NaiveDate,
    departure: &str,
    destination: &str,
    now: DateTime<Utc>,
) -> Result<Vec<i32>> {
    let seats = sqlx::query_scalar::<_, i32>(
        r#"
        SELECT seat_number
        FROM bookings
        WHERE travel_date = $1
          AND departure = $2
          AND destination = $3
          AND (status = 'booked' OR (status = 'reserved' AND reserved_until > $4))
        ORDER BY seat_number ASC
        "#,
    )
    .bind(travel_date)
    .bind(departure)
    .bind(destination)
    .bind(now)
    .fetch_all(pool)
    .await?;

    Ok(seats)
}

/// Place a hold on a seat in a single statement. The insert either lands on
/// a free identity, or hits `one_seat_per_trip` and takes over the existing
/// row only when that row is a hold that had already lapsed at `now`.
/// Returns `None` when the seat is booked or actively held by someone else;
/// Postgres locks the conflicting row, so exactly one of two racing callers
/// gets the seat.
pub async fn reserve_seat(
    pool: &Pool<Postgres>,
    user_id: i32,
    seat_number: i32,
    travel_date: NaiveDate,
    departure: &str,
    destination: &str,
    reserved_until: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<Option<DbBooking>> {
    let id = Uuid::new_v4();

    tracing::debug!(
        "Reserving seat: id={}, user_id={}, seat={}, date={}, departure={}, destination={}",
        id, user_id, seat_number, travel_date, departure, destination
    );

    let booking = sqlx::query_as::<_, DbBooking>(
        r#"
        INSERT INTO bookings (id, user_id, seat_number, travel_date, departure, destination, status, reserved_until, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, 'reserved', $7, $8)
        ON CONFLICT (travel_date, departure, destination, seat_number) DO UPDATE
        SET id = EXCLUDED.id,
            user_id = EXCLUDED.user_id,
            reserved_until = EXCLUDED.reserved_until,
            created_at = EXCLUDED.created_at
        WHERE bookings.status = 'reserved' AND bookings.reserved_until <= $8
        RETURNING id, user_id, seat_number, travel_date, departure, destination, status, reserved_until, created_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(seat_number)
    .bind(travel_date)
    .bind(departure)
    .bind(destination)
    .bind(reserved_until)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    if booking.is_some() {
        tracing::debug!("Seat reserved: seat={}, user_id={}", seat_number, user_id);
    } else {
        tracing::debug!("Seat already taken: seat={}", seat_number);
    }

    Ok(booking)
}

/// Promote the caller's live hold to a booking. The status and deadline
/// checks run inside the update itself, so a lapsed or foreign hold can
/// never be confirmed. Returns `None` when no such hold exists.
pub async fn confirm_seat(
    pool: &Pool<Postgres>,
    user_id: i32,
    seat_number: i32,
    travel_date: NaiveDate,
    departure: &str,
    destination: &str,
    now: DateTime<Utc>,
) -> Result<Option<DbBooking>> {
    let booking = sqlx::query_as::<_, DbBooking>(
        r#"
        UPDATE bookings
        SET status = 'booked', reserved_until = NULL
        WHERE seat_number = $1
          AND travel_date = $2
          AND departure = $3
          AND destination = $4
          AND user_id = $5
          AND status = 'reserved'
          AND reserved_until > $6
        RETURNING id, user_id, seat_number, travel_date, departure, destination, status, reserved_until, created_at
        "#,
    )
    .bind(seat_number)
    .bind(travel_date)
    .bind(departure)
    .bind(destination)
    .bind(user_id)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    if let Some(b) = &booking {
        tracing::debug!("Seat booked: id={}, seat={}, user_id={}", b.id, b.seat_number, b.user_id);
    } else {
        tracing::debug!("No live hold to confirm: seat={}, user_id={}", seat_number, user_id);
    }

    Ok(booking)
}

/// Bookings for the report, joined to the registered passenger's name.
/// Holds that have lapsed by `now` are left out.
pub async fn bookings_between(
    pool: &Pool<Postgres>,
    start_date: NaiveDate,
    end_date: NaiveDate,
    now: DateTime<Utc>,
) -> Result<Vec<DbReportRow>> {
    let rows = sqlx::query_as::<_, DbReportRow>(
        r#"
        SELECT b.id, a.first_name || ' ' || a.last_name AS full_name, b.seat_number, b.destination, b.travel_date
        FROM bookings b
        JOIN profiles p ON b.user_id = p.user_id
        JOIN accounts a ON a.id = p.user_id
        WHERE b.travel_date BETWEEN $1 AND $2
          AND (b.status = 'booked' OR (b.status = 'reserved' AND b.reserved_until > $3))
        ORDER BY b.travel_date ASC, b.seat_number ASC
        "#,
    )
    .bind(start_date)
    .bind(end_date)
    .bind(now)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Remove holds whose deadline passed. Reads already ignore them; this
/// just keeps the table from accumulating dead rows.
pub async fn delete_expired_holds(pool: &Pool<Postgres>, now: DateTime<Utc>) -> Result<u64> {
    let result = sqlx::query(
        r#"
        DELETE FROM bookings
        WHERE status = 'reserved' AND reserved_until <= $1
        "#,
    )
    .bind(now)
    .execute(pool)
    .await?;

    let swept = result.rows_affected();
    if swept > 0 {
        tracing::debug!("Swept {} expired holds", swept);
    }

    Ok(swept)
}
