use crate::models::{DbAccount, DbProfile, DbUserDetails};
use chrono::{NaiveDate, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};

/// Insert a new account. Returns `None` when the email is already taken.
pub async fn create_account(
    pool: &Pool<Postgres>,
    first_name: &str,
    last_name: &str,
    email: &str,
    password_hash: &str,
) -> Result<Option<DbAccount>> {
    let now = Utc::now();

    tracing::debug!("Creating account: email={}", email);

    let account = sqlx::query_as::<_, DbAccount>(
        r#"
        INSERT INTO accounts (first_name, last_name, email, password_hash, created_at)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (email) DO NOTHING
        RETURNING id, first_name, last_name, email, password_hash, created_at
        "#,
    )
    .bind(first_name)
    .bind(last_name)
    .bind(email)
    .bind(password_hash)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    Ok(account)
}

pub async fn get_account_by_email(
    pool: &Pool<Postgres>,
    email: &str,
) -> Result<Option<DbAccount>> {
    let account = sqlx::query_as::<_, DbAccount>(
        r#"
        SELECT id, first_name, last_name, email, password_hash, created_at
        FROM accounts
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(account)
}

/// Replace the stored password hash. Returns false when no account has
/// that email.
pub async fn update_password(
    pool: &Pool<Postgres>,
    email: &str,
    password_hash: &str,
) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE accounts
        SET password_hash = $2
        WHERE email = $1
        "#,
    )
    .bind(email)
    .bind(password_hash)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Attach travel details to an account. Returns `None` when the account
/// already has a profile.
pub async fn create_profile(
    pool: &Pool<Postgres>,
    user_id: i32,
    age: Option<i32>,
    date_of_birth: Option<NaiveDate>,
    gender: Option<&str>,
    address: Option<&str>,
    mobile_number: &str,
    country: Option<&str>,
) -> Result<Option<DbProfile>> {
    let now = Utc::now();

    tracing::debug!("Creating profile: user_id={}", user_id);

    let profile = sqlx::query_as::<_, DbProfile>(
        r#"
        INSERT INTO profiles (user_id, age, date_of_birth, gender, address, mobile_number, country, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (user_id) DO NOTHING
        RETURNING user_id, age, date_of_birth, gender, address, mobile_number, country, created_at
        "#,
    )
    .bind(user_id)
    .bind(age)
    .bind(date_of_birth)
    .bind(gender)
    .bind(address)
    .bind(mobile_number)
    .bind(country)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    Ok(profile)
}

pub async fn user_details_by_email(
    pool: &Pool<Postgres>,
    email: &str,
) -> Result<Option<DbUserDetails>> {
    let details = sqlx::query_as::<_, DbUserDetails>(
        r#"
        SELECT a.email, a.first_name, a.last_name, p.age, p.gender, p.address, p.mobile_number, p.country, p.user_id
        FROM profiles p
        JOIN accounts a ON p.user_id = a.id
        WHERE a.email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(details)
}

/// Full name of a registered passenger. Accounts without a profile
/// resolve to `None`.
pub async fn profile_name_by_user_id(
    pool: &Pool<Postgres>,
    user_id: i32,
) -> Result<Option<String>> {
    let name = sqlx::query_scalar::<_, String>(
        r#"
        SELECT a.first_name || ' ' || a.last_name
        FROM accounts a
        JOIN profiles p ON p.user_id = a.id
        WHERE a.id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(name)
}
