pub mod member;
pub mod person;
