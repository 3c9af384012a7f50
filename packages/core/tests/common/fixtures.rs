//! Test fixtures for creating test data.
//!
//! These fixtures use the entity builders directly; persistence goes through
//! the repository under test.

use anyhow::Result;
use chrono::Utc;
use crm_core::common::PersonId;
use crm_core::domains::member::{Gender, Member, Person};
use sqlx::PgPool;

/// Build a transient member owning a John Doe person.
pub fn test_member(member_number: &str, employee_number: &str) -> Member {
    let now = Utc::now();
    Member::builder()
        .member_number(member_number)
        .employee_number(employee_number)
        .person(Person::new("John", "Doe", Gender::Male))
        .creation_date(now)
        .last_update_user("test.user")
        .last_update_date(now)
        .build()
}

/// Whether a persons row with the given id still exists.
pub async fn person_exists(pool: &PgPool, id: PersonId) -> Result<bool> {
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM persons WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await?;
    Ok(exists)
}
