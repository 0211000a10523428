//! Person and phone number models and DTOs.
//!
//! A person owns zero or more phone numbers through `phone_numbers.person_id`.

use rolodex_core::person::ValidatedPerson;
use rolodex_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `people` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Person {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `phone_numbers` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct PhoneNumber {
    pub id: DbId,
    pub number: String,
    pub person_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A person together with every phone number that references it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonDetail {
    #[serde(flatten)]
    pub person: Person,
    pub phone_numbers: Vec<PhoneNumber>,
}

/// DTO for creating a person along with its first phone number.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePerson {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

impl From<ValidatedPerson> for CreatePerson {
    fn from(p: ValidatedPerson) -> Self {
        Self {
            first_name: p.first_name,
            last_name: p.last_name,
            phone: p.phone,
        }
    }
}

/// One row of `people LEFT JOIN phone_numbers`.
///
/// `match_no` numbers the matched person rows, so two person rows sharing an
/// id stay apart. Phone columns are `NULL` for a person without phone numbers.
#[derive(Debug, Clone, FromRow)]
pub struct PersonPhoneRow {
    pub match_no: i64,
    pub person_id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub person_created_at: Timestamp,
    pub person_updated_at: Timestamp,
    pub phone_id: Option<DbId>,
    pub number: Option<String>,
    pub phone_created_at: Option<Timestamp>,
    pub phone_updated_at: Option<Timestamp>,
}

impl PersonDetail {
    /// Fold joined rows into one detail per matched person row.
    ///
    /// Rows must arrive grouped by `match_no`; person order is preserved.
    pub fn from_joined_rows(rows: Vec<PersonPhoneRow>) -> Vec<PersonDetail> {
        let mut details: Vec<PersonDetail> = Vec::new();
        let mut current_match: Option<i64> = None;
        for row in rows {
            let phone = match (
                row.phone_id,
                row.number,
                row.phone_created_at,
                row.phone_updated_at,
            ) {
                (Some(id), Some(number), Some(created_at), Some(updated_at)) => Some(PhoneNumber {
                    id,
                    number,
                    person_id: row.person_id,
                    created_at,
                    updated_at,
                }),
                _ => None,
            };

            if current_match == Some(row.match_no) {
                if let Some(last) = details.last_mut() {
                    last.phone_numbers.extend(phone);
                }
                continue;
            }

            current_match = Some(row.match_no);
            details.push(PersonDetail {
                person: Person {
                    id: row.person_id,
                    first_name: row.first_name,
                    last_name: row.last_name,
                    created_at: row.person_created_at,
                    updated_at: row.person_updated_at,
                },
                phone_numbers: phone.into_iter().collect(),
            });
        }
        details
    }
}
