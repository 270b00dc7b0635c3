use utoipa::OpenApi;
use varsity_core::{ErrorResponse, FieldError};
use varsity_models::{
    AcademicFaculty, AcademicSemester, AccountStatus, BloodGroup, CreateStudentPayload, Gender,
    Guardian, GuardianPayload, LocalGuardian, LocalGuardianPayload, Month, PopulatedDepartment,
    SemesterCode, SemesterName, Student, UpdateAck, UserName, UserNamePayload,
};

use crate::modules::health::HealthStatus;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::health::health,
        crate::modules::students::controller::get_all_students,
        crate::modules::students::controller::get_single_student,
        crate::modules::students::controller::delete_student,
        crate::modules::students::controller::create_student,
    ),
    components(
        schemas(
            Student,
            UserName,
            Guardian,
            LocalGuardian,
            Gender,
            BloodGroup,
            AccountStatus,
            AcademicSemester,
            SemesterName,
            SemesterCode,
            Month,
            PopulatedDepartment,
            AcademicFaculty,
            UpdateAck,
            CreateStudentPayload,
            UserNamePayload,
            GuardianPayload,
            LocalGuardianPayload,
            ErrorResponse,
            FieldError,
            HealthStatus,
        )
    ),
    tags(
        (name = "Students", description = "Student record endpoints"),
        (name = "Health", description = "Service health")
    ),
    info(
        title = "Varsity API",
        version = "0.1.0",
        description = "Student records for a university management backend, built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;
