//! Repository for the `phone_numbers` table.

use rolodex_core::types::DbId;
use sqlx::{Postgres, Transaction};

use crate::models::person::PhoneNumber;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, number, person_id, created_at, updated_at";

/// Provides access to phone numbers. Every phone number belongs to a person.
pub struct PhoneNumberRepo;

impl PhoneNumberRepo {
    /// Insert a phone number for `person_id` inside an open transaction.
    pub async fn create_in(
        tx: &mut Transaction<'_, Postgres>,
        person_id: DbId,
        number: &str,
    ) -> Result<PhoneNumber, sqlx::Error> {
        let query = format!(
            "INSERT INTO phone_numbers (number, person_id) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PhoneNumber>(&query)
            .bind(number)
            .bind(person_id)
            .fetch_one(&mut **tx)
            .await
    }

    /// Count the phone numbers referencing a person inside an open transaction.
    pub async fn count_for_person_in(
        tx: &mut Transaction<'_, Postgres>,
        person_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM phone_numbers WHERE person_id = $1")
                .bind(person_id)
                .fetch_one(&mut **tx)
                .await?;
        Ok(count)
    }
}
