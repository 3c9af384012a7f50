//! PostgreSQL persistence for members and their owned persons.
//!
//! Every operation runs in a single transaction. Updates are guarded by
//! optimistic locking: the UPDATE carries the version the caller read in
//! its WHERE clause and bumps the column by one, so a stale writer matches
//! zero rows and gets a `VersionConflict` instead of overwriting.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, instrument};

use crate::common::{MemberId, PersonId, Repository, RepositoryError};

use super::models::member::Member;
use super::models::person::{Gender, Person};

/// Repository for [`Member`] entities backed by PostgreSQL.
///
/// Saving a member cascades to its owned person: a transient person is
/// inserted (before the member row that references it), a persistent one is
/// updated with its own version check. Deleting a member removes the person
/// row in the same transaction.
#[derive(Clone)]
pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Flat row shape for hydrating a member joined to its person.
#[derive(sqlx::FromRow)]
struct MemberRow {
    id: MemberId,
    version: i32,
    member_number: String,
    employee_number: String,
    creation_date: DateTime<Utc>,
    last_update_user: String,
    last_update_date: DateTime<Utc>,
    person_id: PersonId,
    person_version: i32,
    first_name: String,
    last_name: String,
    gender: Gender,
    cell_phone_number: Option<String>,
    email: Option<String>,
    birth_date: Option<NaiveDate>,
    social_insurance_number: Option<String>,
}

impl From<MemberRow> for Member {
    fn from(row: MemberRow) -> Self {
        Self {
            id: Some(row.id),
            version: row.version,
            member_number: row.member_number,
            employee_number: row.employee_number,
            person: Person {
                id: Some(row.person_id),
                version: row.person_version,
                first_name: row.first_name,
                last_name: row.last_name,
                gender: row.gender,
                cell_phone_number: row.cell_phone_number,
                email: row.email,
                birth_date: row.birth_date,
                social_insurance_number: row.social_insurance_number,
            },
            creation_date: row.creation_date,
            last_update_user: row.last_update_user,
            last_update_date: row.last_update_date,
        }
    }
}

/// Insert-or-update the person within the member's transaction.
///
/// Writes the assigned id and refreshed version back into the entity and
/// returns the id for the member's foreign key.
async fn save_person(
    tx: &mut Transaction<'_, Postgres>,
    person: &mut Person,
) -> Result<PersonId, RepositoryError> {
    match person.id {
        None => {
            let (id, version): (PersonId, i32) = sqlx::query_as(
                "INSERT INTO persons (
                    first_name,
                    last_name,
                    gender,
                    cell_phone_number,
                    email,
                    birth_date,
                    social_insurance_number
                 )
                 VALUES ($1, $2, $3, $4, $5, $6, $7)
                 RETURNING id, version",
            )
            .bind(&person.first_name)
            .bind(&person.last_name)
            .bind(person.gender)
            .bind(person.cell_phone_number.as_deref())
            .bind(person.email.as_deref())
            .bind(person.birth_date)
            .bind(person.social_insurance_number.as_deref())
            .fetch_one(&mut **tx)
            .await
            .map_err(RepositoryError::from_sqlx)?;

            person.id = Some(id);
            person.version = version;
            debug!(person_id = %id, "inserted person");
            Ok(id)
        }
        Some(id) => {
            let refreshed: Option<(i32,)> = sqlx::query_as(
                "UPDATE persons
                 SET version = version + 1,
                     first_name = $3,
                     last_name = $4,
                     gender = $5,
                     cell_phone_number = $6,
                     email = $7,
                     birth_date = $8,
                     social_insurance_number = $9
                 WHERE id = $1 AND version = $2
                 RETURNING version",
            )
            .bind(id)
            .bind(person.version)
            .bind(&person.first_name)
            .bind(&person.last_name)
            .bind(person.gender)
            .bind(person.cell_phone_number.as_deref())
            .bind(person.email.as_deref())
            .bind(person.birth_date)
            .bind(person.social_insurance_number.as_deref())
            .fetch_optional(&mut **tx)
            .await
            .map_err(RepositoryError::from_sqlx)?;

            match refreshed {
                Some((version,)) => {
                    person.version = version;
                    Ok(id)
                }
                None => Err(RepositoryError::VersionConflict {
                    entity: "Person",
                    id: id.into_inner(),
                    version: person.version,
                }),
            }
        }
    }
}

#[async_trait]
impl Repository<Member> for PgMemberRepository {
    #[instrument(skip_all, fields(member_id = ?member.id, member_number = %member.member_number))]
    async fn save(&self, mut member: Member) -> Result<Member, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        // Person first: the member row references it.
        let person_id = save_person(&mut tx, &mut member.person).await?;

        match member.id {
            None => {
                let (id, version): (MemberId, i32) = sqlx::query_as(
                    "INSERT INTO members (
                        member_number,
                        employee_number,
                        person_id,
                        creation_date,
                        last_update_user,
                        last_update_date
                     )
                     VALUES ($1, $2, $3, $4, $5, $6)
                     RETURNING id, version",
                )
                .bind(&member.member_number)
                .bind(&member.employee_number)
                .bind(person_id)
                .bind(member.creation_date)
                .bind(&member.last_update_user)
                .bind(member.last_update_date)
                .fetch_one(&mut *tx)
                .await
                .map_err(RepositoryError::from_sqlx)?;

                member.id = Some(id);
                member.version = version;
                debug!(member_id = %id, "inserted member");
            }
            Some(id) => {
                // member_number and creation_date are frozen after creation.
                let refreshed: Option<(i32,)> = sqlx::query_as(
                    "UPDATE members
                     SET version = version + 1,
                         employee_number = $3,
                         person_id = $4,
                         last_update_user = $5,
                         last_update_date = $6
                     WHERE id = $1 AND version = $2
                     RETURNING version",
                )
                .bind(id)
                .bind(member.version)
                .bind(&member.employee_number)
                .bind(person_id)
                .bind(&member.last_update_user)
                .bind(member.last_update_date)
                .fetch_optional(&mut *tx)
                .await
                .map_err(RepositoryError::from_sqlx)?;

                match refreshed {
                    Some((version,)) => {
                        member.version = version;
                        debug!(member_id = %id, version, "updated member");
                    }
                    None => {
                        return Err(RepositoryError::VersionConflict {
                            entity: "Member",
                            id: id.into_inner(),
                            version: member.version,
                        });
                    }
                }
            }
        }

        tx.commit().await.map_err(RepositoryError::from_sqlx)?;
        Ok(member)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: MemberId) -> Result<Option<Member>, RepositoryError> {
        let row: Option<MemberRow> = sqlx::query_as(
            "SELECT m.id, m.version, m.member_number, m.employee_number,
                    m.creation_date, m.last_update_user, m.last_update_date,
                    p.id AS person_id, p.version AS person_version,
                    p.first_name, p.last_name, p.gender, p.cell_phone_number,
                    p.email, p.birth_date, p.social_insurance_number
             FROM members m
             JOIN persons p ON p.id = m.person_id
             WHERE m.id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::from_sqlx)?;

        Ok(row.map(Member::from))
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Member>, RepositoryError> {
        let rows: Vec<MemberRow> = sqlx::query_as(
            "SELECT m.id, m.version, m.member_number, m.employee_number,
                    m.creation_date, m.last_update_user, m.last_update_date,
                    p.id AS person_id, p.version AS person_version,
                    p.first_name, p.last_name, p.gender, p.cell_phone_number,
                    p.email, p.birth_date, p.social_insurance_number
             FROM members m
             JOIN persons p ON p.id = m.person_id
             ORDER BY m.id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::from_sqlx)?;

        Ok(rows.into_iter().map(Member::from).collect())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: MemberId) -> Result<bool, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let owned: Option<(PersonId,)> = sqlx::query_as(
            "DELETE FROM members WHERE id = $1 RETURNING person_id",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(RepositoryError::from_sqlx)?;

        let Some((person_id,)) = owned else {
            return Ok(false);
        };

        // Cascade: the member exclusively owns its person.
        sqlx::query("DELETE FROM persons WHERE id = $1")
            .bind(person_id)
            .execute(&mut *tx)
            .await
            .map_err(RepositoryError::from_sqlx)?;

        tx.commit().await.map_err(RepositoryError::from_sqlx)?;
        debug!(member_id = %id, person_id = %person_id, "deleted member and owned person");
        Ok(true)
    }
}
