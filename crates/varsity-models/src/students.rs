//! Student domain models.
//!
//! A student is stored once and read in two shapes:
//!
//! - [`StoredStudent`]: the raw row, including the password hash, the
//!   soft-delete flag and references as bare ids. Only the store and tests
//!   see it.
//! - [`Student`]: the public view returned by every read and by create. It has
//!   no password field, expands `admissionSemester` and
//!   `academicDepartment → academicFaculty` inline, and carries the derived
//!   `fullName`.
//!
//! Writes flow the other way: a validated [`NewStudent`] holds the plaintext
//! password, and the service turns it into a [`NewStudentRecord`] holding only
//! the hash before anything reaches a store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;

use crate::academics::{AcademicSemester, PopulatedDepartment};
use crate::ids::{AcademicDepartmentId, AcademicSemesterId, UserId};
use crate::value_types::{AccountStatus, BloodGroup, Gender};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserName {
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    pub last_name: String,
}

impl UserName {
    /// First, middle and last name joined by single spaces. Absent or blank
    /// parts are skipped, so a missing middle name never leaves a double space.
    pub fn full_name(&self) -> String {
        [
            Some(self.first_name.as_str()),
            self.middle_name.as_deref(),
            Some(self.last_name.as_str()),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Guardian {
    pub father_name: String,
    pub father_occupation: String,
    pub father_contact_no: String,
    pub mother_name: String,
    pub mother_occupation: String,
    pub mother_contact_no: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocalGuardian {
    pub name: String,
    pub occupation: String,
    pub contact_no: String,
    pub address: String,
}

/// Every student field a caller supplies, except the password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentProfile {
    pub id: String,
    pub user: Option<UserId>,
    pub name: UserName,
    pub gender: Gender,
    pub date_of_birth: Option<String>,
    pub email: String,
    pub contact_no: String,
    pub emergency_contact_no: String,
    pub blood_group: Option<BloodGroup>,
    pub present_address: String,
    pub permanent_address: String,
    pub guardian: Guardian,
    pub local_guardian: LocalGuardian,
    pub profile_img: Option<String>,
    pub admission_semester: Option<AcademicSemesterId>,
    pub academic_department: Option<AcademicDepartmentId>,
    pub is_active: AccountStatus,
}

/// A payload that passed validation. Still holds the plaintext password.
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub password: String,
    pub profile: StudentProfile,
}

impl NewStudent {
    /// Swaps the plaintext password for its hash.
    pub fn into_record(self, password_hash: String) -> NewStudentRecord {
        NewStudentRecord {
            password_hash,
            profile: self.profile,
        }
    }
}

/// What a store persists on insert.
#[derive(Debug, Clone)]
pub struct NewStudentRecord {
    pub password_hash: String,
    pub profile: StudentProfile,
}

/// A student row exactly as stored.
#[derive(Debug, Clone, FromRow)]
pub struct StoredStudent {
    pub id: String,
    pub user_id: Option<UserId>,
    pub password: String,
    pub name: Json<UserName>,
    pub gender: Gender,
    pub date_of_birth: Option<String>,
    pub email: String,
    pub contact_no: String,
    pub emergency_contact_no: String,
    pub blood_group: Option<BloodGroup>,
    pub present_address: String,
    pub permanent_address: String,
    pub guardian: Json<Guardian>,
    pub local_guardian: Json<LocalGuardian>,
    pub profile_img: Option<String>,
    pub admission_semester: Option<AcademicSemesterId>,
    pub academic_department: Option<AcademicDepartmentId>,
    pub is_active: AccountStatus,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredStudent {
    /// Builds the row a fresh insert produces: active, not deleted, stamped `now`.
    pub fn from_record(record: NewStudentRecord, now: DateTime<Utc>) -> Self {
        let profile = record.profile;
        Self {
            id: profile.id,
            user_id: profile.user,
            password: record.password_hash,
            name: Json(profile.name),
            gender: profile.gender,
            date_of_birth: profile.date_of_birth,
            email: profile.email,
            contact_no: profile.contact_no,
            emergency_contact_no: profile.emergency_contact_no,
            blood_group: profile.blood_group,
            present_address: profile.present_address,
            permanent_address: profile.permanent_address,
            guardian: Json(profile.guardian),
            local_guardian: Json(profile.local_guardian),
            profile_img: profile.profile_img,
            admission_semester: profile.admission_semester,
            academic_department: profile.academic_department,
            is_active: profile.is_active,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Drops the password hash and attaches the expanded references.
    pub fn into_student(
        self,
        admission_semester: Option<AcademicSemester>,
        academic_department: Option<PopulatedDepartment>,
    ) -> Student {
        let name = self.name.0;
        let full_name = name.full_name();

        Student {
            id: self.id,
            user: self.user_id,
            name,
            gender: self.gender,
            date_of_birth: self.date_of_birth,
            email: self.email,
            contact_no: self.contact_no,
            emergency_contact_no: self.emergency_contact_no,
            blood_group: self.blood_group,
            present_address: self.present_address,
            permanent_address: self.permanent_address,
            guardian: self.guardian.0,
            local_guardian: self.local_guardian.0,
            profile_img: self.profile_img,
            admission_semester,
            academic_department,
            is_active: self.is_active,
            is_deleted: self.is_deleted,
            full_name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// A student as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub user: Option<UserId>,
    pub name: UserName,
    pub gender: Gender,
    pub date_of_birth: Option<String>,
    pub email: String,
    pub contact_no: String,
    pub emergency_contact_no: String,
    pub blood_group: Option<BloodGroup>,
    pub present_address: String,
    pub permanent_address: String,
    pub guardian: Guardian,
    pub local_guardian: LocalGuardian,
    pub profile_img: Option<String>,
    pub admission_semester: Option<AcademicSemester>,
    pub academic_department: Option<PopulatedDepartment>,
    pub is_active: AccountStatus,
    pub is_deleted: bool,
    /// Derived from `name`; never stored.
    pub full_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Write acknowledgement for a soft delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAck {
    pub acknowledged: bool,
    /// Rows with the requested id, deleted or not.
    pub matched_count: u64,
    /// Rows whose flag actually flipped from active to deleted.
    pub modified_count: u64,
}

impl UpdateAck {
    pub fn new(matched_count: u64, modified_count: u64) -> Self {
        Self {
            acknowledged: true,
            matched_count,
            modified_count,
        }
    }
}

/// Which rows a read may see.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StudentScope {
    /// Excludes soft-deleted students. Every service read uses this.
    #[default]
    Active,
    /// Includes soft-deleted students.
    All,
}

impl StudentScope {
    pub fn admits(&self, is_deleted: bool) -> bool {
        match self {
            Self::Active => !is_deleted,
            Self::All => true,
        }
    }

    /// SQL condition on the `is_deleted` column of `table`, if the scope needs one.
    pub fn sql_predicate(&self, table: &str) -> Option<String> {
        match self {
            Self::Active => Some(format!("{}.is_deleted = FALSE", table)),
            Self::All => None,
        }
    }
}

/// Filter for student reads. The soft-delete scope is part of every query
/// and defaults to [`StudentScope::Active`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentQuery {
    pub id: Option<String>,
    pub scope: StudentScope,
}

impl StudentQuery {
    pub fn active() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn including_deleted(mut self) -> Self {
        self.scope = StudentScope::All;
        self
    }

    pub fn matches(&self, student: &StoredStudent) -> bool {
        self.scope.admits(student.is_deleted)
            && self.id.as_deref().is_none_or(|id| student.id == id)
    }
}
