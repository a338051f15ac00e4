use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create accounts table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS accounts (
            id SERIAL PRIMARY KEY,
            first_name VARCHAR(255) NOT NULL,
            last_name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL UNIQUE,
            password_hash VARCHAR(255) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create profiles table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS profiles (
            user_id INTEGER PRIMARY KEY REFERENCES accounts(id),
            age INTEGER NULL,
            date_of_birth DATE NULL,
            gender VARCHAR(50) NULL,
            address VARCHAR(255) NULL,
            mobile_number VARCHAR(20) NOT NULL,
            country VARCHAR(255) NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create countries table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS countries (
            id SERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL UNIQUE
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create bookings table. The unique constraint is what lets a seat be
    // claimed atomically; reserved holds must carry a deadline and booked
    // rows must not.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bookings (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            user_id INTEGER NOT NULL REFERENCES accounts(id),
            seat_number INTEGER NOT NULL,
            travel_date DATE NOT NULL,
            departure VARCHAR(8) NOT NULL,
            destination VARCHAR(255) NOT NULL,
            status VARCHAR(16) NOT NULL,
            reserved_until TIMESTAMP WITH TIME ZONE NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_seat_number CHECK (seat_number BETWEEN 1 AND 30),
            CONSTRAINT valid_status CHECK (status IN ('reserved', 'booked')),
            CONSTRAINT hold_has_deadline CHECK ((status = 'reserved') = (reserved_until IS NOT NULL)),
            CONSTRAINT one_seat_per_trip UNIQUE (travel_date, departure, destination, seat_number)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes, one statement per query so they go through as
    // single prepared statements
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_bookings_user_id ON bookings(user_id);")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_bookings_travel_date ON bookings(travel_date);")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_bookings_reserved_until ON bookings(reserved_until);")
        .execute(pool)
        .await?;

    // Seed the destination list the booking and registration forms read
    sqlx::query(
        r#"
        INSERT INTO countries (name)
        VALUES
            ('Australia'),
            ('Canada'),
            ('France'),
            ('Germany'),
            ('India'),
            ('Japan'),
            ('Singapore'),
            ('Sri Lanka'),
            ('United Kingdom'),
            ('United States')
        ON CONFLICT (name) DO NOTHING;
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
