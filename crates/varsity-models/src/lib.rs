//! # Varsity Models
//!
//! Domain models and DTOs for the Varsity API.
//!
//! # Modules
//!
//! - [`academics`]: Faculties, departments and semesters a student references
//! - [`ids`]: Typed UUID identifiers
//! - [`students`]: Student records, the public view, and read filters
//! - [`validation`]: The create payload and its rules
//! - [`value_types`]: Closed text enumerations (gender, blood group, status)
//!
//! # Example
//!
//! ```ignore
//! use varsity_models::{CreateStudentPayload, StudentQuery, validate_student};
//!
//! let student = validate_student(payload).map_err(|f| AppError::validation(f.errors))?;
//! let query = StudentQuery::active().with_id(&student.profile.id);
//! ```

pub mod academics;
pub mod ids;
pub mod students;
pub mod validation;
pub mod value_types;

pub use academics::{
    AcademicDepartment, AcademicFaculty, AcademicSemester, Month, PopulatedDepartment,
    SemesterCode, SemesterName,
};

pub use ids::{AcademicDepartmentId, AcademicFacultyId, AcademicSemesterId, UserId};

pub use students::{
    Guardian, LocalGuardian, NewStudent, NewStudentRecord, StoredStudent, Student, StudentProfile,
    StudentQuery, StudentScope, UpdateAck, UserName,
};

pub use validation::{
    CreateStudentPayload, GuardianPayload, LocalGuardianPayload, UserNamePayload,
    ValidationFailure, validate_student,
};

pub use value_types::{AccountStatus, BloodGroup, Gender, ValueTypeError};
