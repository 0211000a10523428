//! Repository for the `people` table.

use rolodex_core::types::DbId;
use sqlx::PgPool;

use crate::models::person::{CreatePerson, Person, PersonDetail, PersonPhoneRow};
use crate::repositories::PhoneNumberRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, first_name, last_name, created_at, updated_at";

/// Result of a restricted delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletePersonOutcome {
    /// The person was removed.
    Deleted(Person),
    /// No person has the requested id.
    NotFound,
    /// More than one person row matched the id.
    Ambiguous(usize),
    /// Phone numbers still reference the person; nothing was removed.
    HasPhoneNumbers(i64),
}

/// Provides CRUD operations for people.
pub struct PersonRepo;

impl PersonRepo {
    /// Insert a person and its first phone number in one transaction.
    ///
    /// Both rows are committed together or not at all.
    pub async fn create_with_phone(
        pool: &PgPool,
        input: &CreatePerson,
    ) -> Result<PersonDetail, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO people (first_name, last_name) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        let person = sqlx::query_as::<_, Person>(&insert_query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .fetch_one(&mut *tx)
            .await?;

        let phone = PhoneNumberRepo::create_in(&mut tx, person.id, &input.phone).await?;

        tx.commit().await?;
        tracing::debug!(
            person_id = person.id,
            phone_id = phone.id,
            "Inserted person with phone number"
        );

        Ok(PersonDetail {
            person,
            phone_numbers: vec![phone],
        })
    }

    /// List every person (without phone numbers), ordered by id.
    pub async fn list(pool: &PgPool) -> Result<Vec<Person>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM people ORDER BY id");
        sqlx::query_as::<_, Person>(&query).fetch_all(pool).await
    }

    /// Find every person row matching `id`, each with its phone numbers attached.
    ///
    /// Uses a single `LEFT JOIN`; a person without phone numbers still yields
    /// one entry with an empty list. Each matched person row is numbered so
    /// rows sharing an id are returned separately. Callers reduce the result
    /// with `rolodex_core::matching::single_match`.
    pub async fn find_with_phones(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Vec<PersonDetail>, sqlx::Error> {
        let rows = sqlx::query_as::<_, PersonPhoneRow>(
            "WITH matched AS ( \
                 SELECT id, first_name, last_name, created_at, updated_at, \
                        row_number() OVER () AS match_no \
                 FROM people \
                 WHERE id = $1 \
             ) \
             SELECT m.match_no, m.id AS person_id, m.first_name, m.last_name, \
                    m.created_at AS person_created_at, m.updated_at AS person_updated_at, \
                    ph.id AS phone_id, ph.number, \
                    ph.created_at AS phone_created_at, ph.updated_at AS phone_updated_at \
             FROM matched m \
             LEFT JOIN phone_numbers ph ON ph.person_id = m.id \
             ORDER BY m.match_no, ph.id",
        )
        .bind(id)
        .fetch_all(pool)
        .await?;
        Ok(PersonDetail::from_joined_rows(rows))
    }

    /// Delete the person with `id` unless phone numbers still reference it.
    ///
    /// The matched rows are locked for the duration of the transaction so a
    /// phone number cannot be attached between the check and the delete.
    pub async fn delete_restricted(
        pool: &PgPool,
        id: DbId,
    ) -> Result<DeletePersonOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let select_query = format!("SELECT {COLUMNS} FROM people WHERE id = $1 FOR UPDATE");
        let mut matched = sqlx::query_as::<_, Person>(&select_query)
            .bind(id)
            .fetch_all(&mut *tx)
            .await?;

        let person = match matched.len() {
            0 => return Ok(DeletePersonOutcome::NotFound),
            1 => matched.remove(0),
            n => return Ok(DeletePersonOutcome::Ambiguous(n)),
        };

        let phone_count = PhoneNumberRepo::count_for_person_in(&mut tx, id).await?;
        if phone_count > 0 {
            return Ok(DeletePersonOutcome::HasPhoneNumbers(phone_count));
        }

        sqlx::query("DELETE FROM people WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(DeletePersonOutcome::Deleted(person))
    }
}
