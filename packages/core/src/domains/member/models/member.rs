//! Member entity - a membership record owning exactly one person.

use std::fmt;

use chrono::{DateTime, Utc};
use typed_builder::TypedBuilder;

use crate::common::{Entity, MemberId};

use super::person::Person;

/// A membership record.
///
/// Every member exclusively owns one [`Person`]; the ownership is structural
/// (the field is not optional), so a member without a person cannot be
/// constructed. Saving or deleting a member cascades to its person.
///
/// `member_number` and `creation_date` are immutable after creation: there
/// are no setters for them and the repository excludes both from UPDATE
/// statements. Uniqueness of `member_number` and `employee_number` is
/// enforced by the database.
#[derive(Debug, Clone, PartialEq, TypedBuilder)]
pub struct Member {
    /// Unique identifier, server-assigned on first save.
    #[builder(default, setter(strip_option))]
    pub(crate) id: Option<MemberId>,

    /// Optimistic-lock counter, maintained by the persistence layer.
    #[builder(default)]
    pub(crate) version: i32,

    /// Unique business number of the membership, frozen after creation.
    #[builder(setter(into))]
    pub(crate) member_number: String,

    /// Unique employee number, mutable.
    #[builder(setter(into))]
    pub(crate) employee_number: String,

    /// The person this membership belongs to.
    pub(crate) person: Person,

    /// When the membership was created, frozen after creation.
    pub(crate) creation_date: DateTime<Utc>,

    /// Identifier of the actor who performed the last update.
    #[builder(setter(into))]
    pub(crate) last_update_user: String,

    pub(crate) last_update_date: DateTime<Utc>,
}

impl Member {
    pub fn member_number(&self) -> &str {
        &self.member_number
    }

    pub fn employee_number(&self) -> &str {
        &self.employee_number
    }

    pub fn person(&self) -> &Person {
        &self.person
    }

    /// Mutable access to the owned person; changes are cascaded on save.
    pub fn person_mut(&mut self) -> &mut Person {
        &mut self.person
    }

    /// Returns an independent copy of the creation date.
    pub fn creation_date(&self) -> DateTime<Utc> {
        self.creation_date
    }

    pub fn last_update_user(&self) -> &str {
        &self.last_update_user
    }

    /// Returns an independent copy of the last update date.
    pub fn last_update_date(&self) -> DateTime<Utc> {
        self.last_update_date
    }

    pub fn set_employee_number(&mut self, employee_number: impl Into<String>) {
        self.employee_number = employee_number.into();
    }

    pub fn set_person(&mut self, person: Person) {
        self.person = person;
    }

    pub fn set_last_update_user(&mut self, last_update_user: impl Into<String>) {
        self.last_update_user = last_update_user.into();
    }

    /// Stores an independent copy of the new value.
    pub fn set_last_update_date(&mut self, last_update_date: DateTime<Utc>) {
        self.last_update_date = last_update_date;
    }
}

impl Entity for Member {
    type Key = MemberId;

    fn id(&self) -> Option<MemberId> {
        self.id
    }

    fn set_id(&mut self, key: MemberId) {
        self.id = Some(key);
    }

    fn version(&self) -> i32 {
        self.version
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}
