//! Student record model
//!
//! A `Student` can only be constructed through validation and every field
//! setter re-validates, so an invalid record is never observable. The id is
//! immutable after construction. Serde round-trips through the raw
//! [`StudentRecord`] shape; deserializing runs full construction validation,
//! so a hand-edited data file surfaces a validation error instead of
//! silently accepting bad data.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::{RosterError, RosterResult};
use crate::validation;

/// Student gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Parse a gender from its serialized token
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            _ => None,
        }
    }

    /// The serialized token for this gender
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The raw, unvalidated on-disk shape of a student record
///
/// This is what the data file, backups and import files contain: a flat
/// object with exactly these six fields, keyed by `student_id` at the top
/// level of the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub student_id: String,
    pub name: String,
    pub gender: String,
    pub age: i64,
    pub class_name: String,
    pub contact: String,
}

/// A validated student record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "StudentRecord", try_from = "StudentRecord")]
pub struct Student {
    id: String,
    name: String,
    gender: Gender,
    age: i64,
    class_name: String,
    contact: String,
}

impl Student {
    /// Construct a student, validating every field
    ///
    /// Fields are validated in the order `student_id`, `name`, `gender`,
    /// `age`, `class_name`, `contact`; the first failure is returned.
    pub fn new(
        id: &str,
        name: &str,
        gender: &str,
        age: i64,
        class_name: &str,
        contact: &str,
    ) -> RosterResult<Self> {
        validation::validate_student_id(id)
            .map_err(|reason| RosterError::validation("student_id", reason))?;
        validation::validate_name(name).map_err(|reason| RosterError::validation("name", reason))?;
        validation::validate_gender(gender)
            .map_err(|reason| RosterError::validation("gender", reason))?;
        let gender = Gender::parse(gender)
            .ok_or_else(|| RosterError::validation("gender", "gender must be 'male' or 'female'"))?;
        validation::validate_age(age).map_err(|reason| RosterError::validation("age", reason))?;
        validation::validate_class_name(class_name)
            .map_err(|reason| RosterError::validation("class_name", reason))?;
        validation::validate_contact(contact)
            .map_err(|reason| RosterError::validation("contact", reason))?;

        Ok(Self {
            id: id.to_string(),
            name: name.trim().to_string(),
            gender,
            age,
            class_name: class_name.trim().to_string(),
            contact: contact.trim().to_string(),
        })
    }

    /// The immutable student id
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn age(&self) -> i64 {
        self.age
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn contact(&self) -> &str {
        &self.contact
    }

    /// Set the name, re-validating; the record is unchanged on rejection
    pub fn set_name(&mut self, name: &str) -> RosterResult<()> {
        validation::validate_name(name).map_err(|reason| RosterError::validation("name", reason))?;
        self.name = name.trim().to_string();
        Ok(())
    }

    /// Set the gender, re-validating; the record is unchanged on rejection
    pub fn set_gender(&mut self, gender: &str) -> RosterResult<()> {
        validation::validate_gender(gender)
            .map_err(|reason| RosterError::validation("gender", reason))?;
        self.gender = Gender::parse(gender)
            .ok_or_else(|| RosterError::validation("gender", "gender must be 'male' or 'female'"))?;
        Ok(())
    }

    /// Set the age, re-validating; the record is unchanged on rejection
    pub fn set_age(&mut self, age: i64) -> RosterResult<()> {
        validation::validate_age(age).map_err(|reason| RosterError::validation("age", reason))?;
        self.age = age;
        Ok(())
    }

    /// Set the class name, re-validating; the record is unchanged on rejection
    pub fn set_class_name(&mut self, class_name: &str) -> RosterResult<()> {
        validation::validate_class_name(class_name)
            .map_err(|reason| RosterError::validation("class_name", reason))?;
        self.class_name = class_name.trim().to_string();
        Ok(())
    }

    /// Set the contact, re-validating; the record is unchanged on rejection
    pub fn set_contact(&mut self, contact: &str) -> RosterResult<()> {
        validation::validate_contact(contact)
            .map_err(|reason| RosterError::validation("contact", reason))?;
        self.contact = contact.trim().to_string();
        Ok(())
    }

    /// Apply a partial update, returning the updated record
    ///
    /// Every set field is validated before anything is committed: on the
    /// first rejection the error propagates and `self` is untouched, so a
    /// half-applied update can never reach the caller.
    pub fn with_update(&self, update: &StudentUpdate) -> RosterResult<Self> {
        let mut updated = self.clone();
        if let Some(name) = &update.name {
            updated.set_name(name)?;
        }
        if let Some(gender) = &update.gender {
            updated.set_gender(gender)?;
        }
        if let Some(age) = update.age {
            updated.set_age(age)?;
        }
        if let Some(class_name) = &update.class_name {
            updated.set_class_name(class_name)?;
        }
        if let Some(contact) = &update.contact {
            updated.set_contact(contact)?;
        }
        Ok(updated)
    }

    /// The raw on-disk shape of this record
    pub fn to_record(&self) -> StudentRecord {
        StudentRecord {
            student_id: self.id.clone(),
            name: self.name.clone(),
            gender: self.gender.as_str().to_string(),
            age: self.age,
            class_name: self.class_name.clone(),
            contact: self.contact.clone(),
        }
    }
}

impl TryFrom<StudentRecord> for Student {
    type Error = RosterError;

    fn try_from(record: StudentRecord) -> RosterResult<Self> {
        Self::new(
            &record.student_id,
            &record.name,
            &record.gender,
            record.age,
            &record.class_name,
            &record.contact,
        )
    }
}

impl From<Student> for StudentRecord {
    fn from(student: Student) -> Self {
        student.to_record()
    }
}

// Two students are equal iff their ids are equal; used for deduplication in
// containers, not for value comparison.
impl PartialEq for Student {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Student {}

impl Hash for Student {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "id: {}, name: {}, gender: {}, age: {}, class: {}, contact: {}",
            self.id, self.name, self.gender, self.age, self.class_name, self.contact
        )
    }
}

/// A partial update to a student record
///
/// `None` means "leave the field unchanged"; the id is not part of the
/// update because it is immutable. Unknown fields are unrepresentable.
#[derive(Debug, Clone, Default)]
pub struct StudentUpdate {
    pub name: Option<String>,
    pub gender: Option<String>,
    pub age: Option<i64>,
    pub class_name: Option<String>,
    pub contact: Option<String>,
}

impl StudentUpdate {
    /// An update that changes nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// True if no field is set
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.gender.is_none()
            && self.age.is_none()
            && self.class_name.is_none()
            && self.contact.is_none()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    pub fn age(mut self, age: i64) -> Self {
        self.age = Some(age);
        self
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = Some(contact.into());
        self
    }
}
