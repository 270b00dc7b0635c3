//! Academic reference data a student points at.
//!
//! A student optionally references the semester it was admitted in and the
//! department it belongs to. Departments in turn belong to a faculty, so a
//! fully expanded student carries `semester`, `department → faculty` inline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{
    Database, Decode, Encode, FromRow, Type,
    postgres::{PgHasArrayType, PgTypeInfo},
};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::ids::{AcademicDepartmentId, AcademicFacultyId, AcademicSemesterId};
use crate::value_types::{ValueTypeError, define_text_enum};

define_text_enum!(
    SemesterName ("semester name") {
        Autumn => "Autumn",
        Summer => "Summer",
        Fall => "Fall",
    }
);

define_text_enum!(
    /// Two-digit code paired one-to-one with [`SemesterName`].
    SemesterCode ("semester code") {
        Autumn => "01",
        Summer => "02",
        Fall => "03",
    }
);

define_text_enum!(
    Month ("month") {
        January => "January",
        February => "February",
        March => "March",
        April => "April",
        May => "May",
        June => "June",
        July => "July",
        August => "August",
        September => "September",
        October => "October",
        November => "November",
        December => "December",
    }
);

impl SemesterName {
    pub const fn code(&self) -> SemesterCode {
        match self {
            Self::Autumn => SemesterCode::Autumn,
            Self::Summer => SemesterCode::Summer,
            Self::Fall => SemesterCode::Fall,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AcademicFaculty {
    pub id: AcademicFacultyId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A department as stored, with its faculty as a bare reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AcademicDepartment {
    pub id: AcademicDepartmentId,
    pub name: String,
    pub academic_faculty: AcademicFacultyId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A department with its faculty expanded inline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PopulatedDepartment {
    pub id: AcademicDepartmentId,
    pub name: String,
    pub academic_faculty: AcademicFaculty,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PopulatedDepartment {
    pub fn new(department: AcademicDepartment, faculty: AcademicFaculty) -> Self {
        Self {
            id: department.id,
            name: department.name,
            academic_faculty: faculty,
            created_at: department.created_at,
            updated_at: department.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AcademicSemester {
    pub id: AcademicSemesterId,
    pub name: SemesterName,
    pub code: SemesterCode,
    pub year: String,
    pub start_month: Month,
    pub end_month: Month,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semester_name_maps_to_code() {
        assert_eq!(SemesterName::Autumn.code().as_str(), "01");
        assert_eq!(SemesterName::Summer.code().as_str(), "02");
        assert_eq!(SemesterName::Fall.code().as_str(), "03");
    }

    #[test]
    fn test_month_parsing() {
        assert_eq!("September".parse::<Month>().unwrap(), Month::September);
        assert!("Sept".parse::<Month>().is_err());
        assert_eq!(Month::ALL.len(), 12);
    }

    #[test]
    fn test_populated_department_embeds_faculty() {
        let now = Utc::now();
        let faculty = AcademicFaculty {
            id: AcademicFacultyId::new(),
            name: "Faculty of Engineering".to_string(),
            created_at: now,
            updated_at: now,
        };
        let department = AcademicDepartment {
            id: AcademicDepartmentId::new(),
            name: "Computer Science".to_string(),
            academic_faculty: faculty.id,
            created_at: now,
            updated_at: now,
        };

        let populated = PopulatedDepartment::new(department.clone(), faculty.clone());
        let json = serde_json::to_value(&populated).unwrap();
        assert_eq!(json["name"], "Computer Science");
        assert_eq!(json["academicFaculty"]["name"], "Faculty of Engineering");
        assert_eq!(populated.academic_faculty, faculty);
    }
}
