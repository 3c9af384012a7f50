//! Person entity - the individual behind a membership record.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use thiserror::Error;
use typed_builder::TypedBuilder;

use crate::common::{Entity, PersonId};

/// The possible values for a person's gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    /// Man
    Male,
    /// Woman
    Female,
}

/// Error returned when parsing an unrecognized gender name.
#[derive(Debug, Error)]
#[error("unknown gender: {0}")]
pub struct ParseGenderError(String);

impl Gender {
    /// The symbolic name used for storage (`"MALE"` / `"FEMALE"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "MALE",
            Self::Female => "FEMALE",
        }
    }

    /// The short display code (`"M"` / `"F"`).
    pub fn code(&self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ParseGenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MALE" => Ok(Self::Male),
            "FEMALE" => Ok(Self::Female),
            other => Err(ParseGenderError(other.to_string())),
        }
    }
}

// ============================================================================
// sqlx support - stored as TEXT by symbolic name
// ============================================================================

use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgArgumentBuffer, PgTypeInfo, PgValueRef, Postgres};
use sqlx::{Decode, Encode, Type};

impl Type<Postgres> for Gender {
    fn type_info() -> PgTypeInfo {
        <&str as Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <&str as Type<Postgres>>::compatible(ty)
    }
}

impl Encode<'_, Postgres> for Gender {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
        <&str as Encode<Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}

impl Decode<'_, Postgres> for Gender {
    fn decode(value: PgValueRef<'_>) -> Result<Self, BoxDynError> {
        let name = <&str as Decode<Postgres>>::decode(value)?;
        name.parse().map_err(Into::into)
    }
}

/// A single person.
///
/// First name, last name and gender are required; everything else is
/// optional. Column constraints (lengths, not-null) are enforced by the
/// database at write time, not by the builder - `build()` never fails.
///
/// Date accessors return owned copies, so callers can never mutate the
/// entity's internal state through a returned value.
#[derive(Debug, Clone, PartialEq, TypedBuilder)]
pub struct Person {
    /// Unique identifier, server-assigned on first save.
    #[builder(default, setter(strip_option))]
    pub(crate) id: Option<PersonId>,

    /// Optimistic-lock counter, maintained by the persistence layer.
    #[builder(default)]
    pub(crate) version: i32,

    /// Forename, max length 80.
    #[builder(setter(into))]
    pub(crate) first_name: String,

    /// Family name, max length 80.
    #[builder(setter(into))]
    pub(crate) last_name: String,

    pub(crate) gender: Gender,

    /// Cellular phone number, max length 10.
    #[builder(default, setter(strip_option, into))]
    pub(crate) cell_phone_number: Option<String>,

    /// Max length 320.
    #[builder(default, setter(strip_option, into))]
    pub(crate) email: Option<String>,

    /// Date-only precision.
    #[builder(default, setter(strip_option))]
    pub(crate) birth_date: Option<NaiveDate>,

    /// Max length 9.
    #[builder(default, setter(strip_option, into))]
    pub(crate) social_insurance_number: Option<String>,
}

impl Person {
    /// Minimal constructor with all mandatory values.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>, gender: Gender) -> Self {
        Self {
            id: None,
            version: 0,
            first_name: first_name.into(),
            last_name: last_name.into(),
            gender,
            cell_phone_number: None,
            email: None,
            birth_date: None,
            social_insurance_number: None,
        }
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn cell_phone_number(&self) -> Option<&str> {
        self.cell_phone_number.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns an independent copy of the birth date.
    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.birth_date
    }

    pub fn social_insurance_number(&self) -> Option<&str> {
        self.social_insurance_number.as_deref()
    }

    pub fn set_first_name(&mut self, first_name: impl Into<String>) {
        self.first_name = first_name.into();
    }

    pub fn set_last_name(&mut self, last_name: impl Into<String>) {
        self.last_name = last_name.into();
    }

    pub fn set_gender(&mut self, gender: Gender) {
        self.gender = gender;
    }

    pub fn set_cell_phone_number(&mut self, cell_phone_number: Option<String>) {
        self.cell_phone_number = cell_phone_number;
    }

    pub fn set_email(&mut self, email: Option<String>) {
        self.email = email;
    }

    /// Stores an independent copy of the new value.
    pub fn set_birth_date(&mut self, birth_date: Option<NaiveDate>) {
        self.birth_date = birth_date;
    }

    pub fn set_social_insurance_number(&mut self, social_insurance_number: Option<String>) {
        self.social_insurance_number = social_insurance_number;
    }
}

impl Entity for Person {
    type Key = PersonId;

    fn id(&self) -> Option<PersonId> {
        self.id
    }

    fn set_id(&mut self, key: PersonId) {
        self.id = Some(key);
    }

    fn version(&self) -> i32 {
        self.version
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}
