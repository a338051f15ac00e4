use crate::models::DbCountry;
use eyre::Result;
use sqlx::{Pool, Postgres};

pub async fn list_countries(pool: &Pool<Postgres>) -> Result<Vec<DbCountry>> {
    let countries = sqlx::query_as::<_, DbCountry>(
        r#"
        SELECT id, name
        FROM countries
        ORDER BY id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(countries)
}

pub async fn country_names(pool: &Pool<Postgres>) -> Result<Vec<String>> {
    let names = sqlx::query_scalar::<_, String>(
        r#"
        SELECT name
        FROM countries
        ORDER BY id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(names)
}
