//! Field validation rules for student records
//!
//! Every rule is a pure function that checks one candidate value and returns
//! `Ok(())` or a human-readable rejection reason. The rules hold no state;
//! the patterns are compiled once on first use.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{RosterError, RosterResult};
use crate::models::StudentRecord;

static STUDENT_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{6,20}$").expect("student id pattern"));

static HAN_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\u{4e00}-\u{9fa5}]{2,10}$").expect("han name pattern"));

static LATIN_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z]+(\s[a-zA-Z]+)*$").expect("latin name pattern"));

static CLASS_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\u{4e00}-\u{9fa5}a-zA-Z0-9\s_-]+$").expect("class name pattern")
});

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^1[3-9][0-9]{9}$").expect("phone pattern"));

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern")
});

/// Validate a student id: digits only, 6-20 characters.
pub fn validate_student_id(student_id: &str) -> Result<(), String> {
    if student_id.trim().is_empty() {
        return Err("student id must not be empty".into());
    }
    if !STUDENT_ID_RE.is_match(student_id) {
        return Err("student id must be 6-20 digits".into());
    }
    Ok(())
}

/// Validate a name: 2-10 characters after trimming, either all Han
/// characters or space-separated Latin words.
pub fn validate_name(name: &str) -> Result<(), String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("name must not be empty".into());
    }
    let len = name.chars().count();
    if !(2..=10).contains(&len) {
        return Err("name must be 2-10 characters".into());
    }
    if !HAN_NAME_RE.is_match(name) && !LATIN_NAME_RE.is_match(name) {
        return Err("name must be Han characters or space-separated Latin words".into());
    }
    Ok(())
}

/// Validate a gender token: `male` or `female`.
pub fn validate_gender(gender: &str) -> Result<(), String> {
    match gender {
        "male" | "female" => Ok(()),
        _ => Err("gender must be 'male' or 'female'".into()),
    }
}

/// Validate an age: integer between 15 and 49 inclusive.
pub fn validate_age(age: i64) -> Result<(), String> {
    if !(15..=49).contains(&age) {
        return Err("age must be between 15 and 49".into());
    }
    Ok(())
}

/// Validate a class name: 1-20 characters after trimming, limited to Han,
/// Latin, digits, whitespace, hyphen and underscore.
pub fn validate_class_name(class_name: &str) -> Result<(), String> {
    let class_name = class_name.trim();
    if class_name.is_empty() {
        return Err("class name must not be empty".into());
    }
    if class_name.chars().count() > 20 {
        return Err("class name must not exceed 20 characters".into());
    }
    if !CLASS_NAME_RE.is_match(class_name) {
        return Err("class name contains illegal characters".into());
    }
    Ok(())
}

/// Validate a contact: at most 50 characters after trimming, and exactly a
/// mainland mobile number or an email address.
pub fn validate_contact(contact: &str) -> Result<(), String> {
    let contact = contact.trim();
    if contact.is_empty() {
        return Err("contact must not be empty".into());
    }
    if contact.chars().count() > 50 {
        return Err("contact must not exceed 50 characters".into());
    }
    if !PHONE_RE.is_match(contact) && !EMAIL_RE.is_match(contact) {
        return Err("contact must be a phone number or an email address".into());
    }
    Ok(())
}

/// Validate every field of a raw record.
///
/// Fields are checked in a fixed order - `student_id`, `name`, `gender`,
/// `age`, `class_name`, `contact` - and the first failure wins, so a record
/// with several bad fields reports the same error on every run.
pub fn validate_record(record: &StudentRecord) -> RosterResult<()> {
    validate_student_id(&record.student_id)
        .map_err(|reason| RosterError::validation("student_id", reason))?;
    validate_name(&record.name).map_err(|reason| RosterError::validation("name", reason))?;
    validate_gender(&record.gender).map_err(|reason| RosterError::validation("gender", reason))?;
    validate_age(record.age).map_err(|reason| RosterError::validation("age", reason))?;
    validate_class_name(&record.class_name)
        .map_err(|reason| RosterError::validation("class_name", reason))?;
    validate_contact(&record.contact)
        .map_err(|reason| RosterError::validation("contact", reason))?;
    Ok(())
}
