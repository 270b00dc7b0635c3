pub use varsity_models::academics::{
    AcademicDepartment, AcademicFaculty, AcademicSemester, PopulatedDepartment,
};
pub use varsity_models::students::{
    NewStudentRecord, StoredStudent, Student, StudentQuery, StudentScope, UpdateAck,
};
pub use varsity_models::validation::{CreateStudentPayload, ValidationFailure, validate_student};
