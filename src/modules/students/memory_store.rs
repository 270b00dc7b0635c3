//! In-process student store.
//!
//! Holds students together with the academic reference data they point at,
//! so population and reference checks behave like the Postgres store. Used by
//! the test suite and by `STORAGE_BACKEND=memory` local runs.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::instrument;
use varsity_core::AppError;
use varsity_models::{
    AcademicDepartmentId, AcademicFacultyId, AcademicSemesterId, Month, SemesterName,
};

use super::model::{
    AcademicDepartment, AcademicFaculty, AcademicSemester, NewStudentRecord, PopulatedDepartment,
    StoredStudent, Student, StudentQuery, UpdateAck,
};
use super::store::{
    StudentStore, duplicate_email, duplicate_id, duplicate_user, unknown_department,
    unknown_semester,
};

#[derive(Default)]
struct MemoryState {
    // Insertion order doubles as `created_at` order.
    students: Vec<StoredStudent>,
    faculties: HashMap<AcademicFacultyId, AcademicFaculty>,
    departments: HashMap<AcademicDepartmentId, AcademicDepartment>,
    semesters: HashMap<AcademicSemesterId, AcademicSemester>,
}

impl MemoryState {
    fn populate(&self, student: &StoredStudent) -> Student {
        let semester = student
            .admission_semester
            .and_then(|id| self.semesters.get(&id).cloned());

        let department = student.academic_department.and_then(|id| {
            let department = self.departments.get(&id)?;
            let faculty = self.faculties.get(&department.academic_faculty)?;
            Some(PopulatedDepartment::new(department.clone(), faculty.clone()))
        });

        student.clone().into_student(semester, department)
    }

    fn check_insert(&self, record: &NewStudentRecord) -> Result<(), AppError> {
        let profile = &record.profile;

        if self.students.iter().any(|s| s.id == profile.id) {
            return Err(duplicate_id(&profile.id));
        }
        if self.students.iter().any(|s| s.email == profile.email) {
            return Err(duplicate_email(&profile.email));
        }
        if let Some(user) = profile.user
            && self.students.iter().any(|s| s.user_id == Some(user))
        {
            return Err(duplicate_user());
        }
        if let Some(id) = profile.admission_semester
            && !self.semesters.contains_key(&id)
        {
            return Err(unknown_semester());
        }
        if let Some(id) = profile.academic_department
            && !self.departments.contains_key(&id)
        {
            return Err(unknown_department());
        }

        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryStudentStore {
    state: RwLock<MemoryState>,
}

impl MemoryStudentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_faculty(&self, name: &str) -> AcademicFaculty {
        let now = Utc::now();
        let faculty = AcademicFaculty {
            id: AcademicFacultyId::new(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };

        self.state
            .write()
            .await
            .faculties
            .insert(faculty.id, faculty.clone());
        faculty
    }

    /// Fails when `faculty` is unknown.
    pub async fn add_department(
        &self,
        name: &str,
        faculty: AcademicFacultyId,
    ) -> Result<AcademicDepartment, AppError> {
        let mut state = self.state.write().await;
        if !state.faculties.contains_key(&faculty) {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Academic faculty not found"
            )));
        }

        let now = Utc::now();
        let department = AcademicDepartment {
            id: AcademicDepartmentId::new(),
            name: name.to_string(),
            academic_faculty: faculty,
            created_at: now,
            updated_at: now,
        };
        state.departments.insert(department.id, department.clone());
        Ok(department)
    }

    pub async fn add_semester(
        &self,
        name: SemesterName,
        year: &str,
        start_month: Month,
        end_month: Month,
    ) -> AcademicSemester {
        let now = Utc::now();
        let semester = AcademicSemester {
            id: AcademicSemesterId::new(),
            name,
            code: name.code(),
            year: year.to_string(),
            start_month,
            end_month,
            created_at: now,
            updated_at: now,
        };

        self.state
            .write()
            .await
            .semesters
            .insert(semester.id, semester.clone());
        semester
    }
}

#[async_trait]
impl StudentStore for MemoryStudentStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    #[instrument(skip(self))]
    async fn find(&self, query: &StudentQuery) -> Result<Vec<Student>, AppError> {
        let state = self.state.read().await;
        Ok(state
            .students
            .iter()
            .filter(|s| query.matches(s))
            .map(|s| state.populate(s))
            .collect())
    }

    #[instrument(skip(self))]
    async fn find_one(&self, query: &StudentQuery) -> Result<Option<Student>, AppError> {
        let state = self.state.read().await;
        Ok(state
            .students
            .iter()
            .find(|s| query.matches(s))
            .map(|s| state.populate(s)))
    }

    #[instrument(skip(self))]
    async fn find_raw(&self, id: &str) -> Result<Option<StoredStudent>, AppError> {
        let state = self.state.read().await;
        Ok(state.students.iter().find(|s| s.id == id).cloned())
    }

    #[instrument(skip(self))]
    async fn exists(&self, id: &str) -> Result<bool, AppError> {
        let query = StudentQuery::active().with_id(id);
        let state = self.state.read().await;
        Ok(state.students.iter().any(|s| query.matches(s)))
    }

    #[instrument(skip(self, record), fields(student_id = %record.profile.id))]
    async fn insert(&self, record: NewStudentRecord) -> Result<StoredStudent, AppError> {
        let mut state = self.state.write().await;
        state.check_insert(&record)?;

        let stored = StoredStudent::from_record(record, Utc::now());
        state.students.push(stored.clone());
        Ok(stored)
    }

    #[instrument(skip(self))]
    async fn soft_delete(&self, id: &str) -> Result<UpdateAck, AppError> {
        let mut state = self.state.write().await;
        let Some(student) = state.students.iter_mut().find(|s| s.id == id) else {
            return Ok(UpdateAck::new(0, 0));
        };

        if student.is_deleted {
            return Ok(UpdateAck::new(1, 0));
        }

        student.is_deleted = true;
        student.updated_at = Utc::now();
        Ok(UpdateAck::new(1, 1))
    }

    #[instrument(skip(self))]
    async fn count_all(&self) -> Result<i64, AppError> {
        Ok(self.state.read().await.students.len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use varsity_models::{
        AccountStatus, Gender, Guardian, LocalGuardian, StudentProfile, UserId, UserName,
    };

    fn record(id: &str, email: &str) -> NewStudentRecord {
        NewStudentRecord {
            password_hash: "$2b$04$stored".to_string(),
            profile: StudentProfile {
                id: id.to_string(),
                user: None,
                name: UserName {
                    first_name: "Mezba".to_string(),
                    middle_name: None,
                    last_name: "Abedin".to_string(),
                },
                gender: Gender::Male,
                date_of_birth: None,
                email: email.to_string(),
                contact_no: "0170000000".to_string(),
                emergency_contact_no: "0180000000".to_string(),
                blood_group: None,
                present_address: "Dhaka".to_string(),
                permanent_address: "Chittagong".to_string(),
                guardian: Guardian {
                    father_name: "Father".to_string(),
                    father_occupation: "Engineer".to_string(),
                    father_contact_no: "0190000000".to_string(),
                    mother_name: "Mother".to_string(),
                    mother_occupation: "Teacher".to_string(),
                    mother_contact_no: "0160000000".to_string(),
                },
                local_guardian: LocalGuardian {
                    name: "Uncle".to_string(),
                    occupation: "Doctor".to_string(),
                    contact_no: "0150000000".to_string(),
                    address: "Sylhet".to_string(),
                },
                profile_img: None,
                admission_semester: None,
                academic_department: None,
                is_active: AccountStatus::Active,
            },
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = MemoryStudentStore::new();
        store.insert(record("1", "a@example.com")).await.unwrap();
        store.insert(record("2", "b@example.com")).await.unwrap();

        let all = store.find(&StudentQuery::active()).await.unwrap();
        let ids: Vec<&str> = all.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(store.count_all().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_id_and_email_conflict() {
        let store = MemoryStudentStore::new();
        store.insert(record("1", "a@example.com")).await.unwrap();

        let err = store.insert(record("1", "x@example.com")).await.unwrap_err();
        assert!(err.is_conflict());

        let err = store.insert(record("2", "a@example.com")).await.unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(store.count_all().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_user_conflicts() {
        let store = MemoryStudentStore::new();
        let user = UserId::new();

        let mut first = record("1", "a@example.com");
        first.profile.user = Some(user);
        store.insert(first).await.unwrap();

        let mut second = record("2", "b@example.com");
        second.profile.user = Some(user);
        assert!(store.insert(second).await.unwrap_err().is_conflict());
    }

    #[tokio::test]
    async fn test_soft_delete_counts() {
        let store = MemoryStudentStore::new();
        store.insert(record("1", "a@example.com")).await.unwrap();

        assert_eq!(store.soft_delete("1").await.unwrap(), UpdateAck::new(1, 1));
        assert_eq!(store.soft_delete("1").await.unwrap(), UpdateAck::new(1, 0));
        assert_eq!(store.soft_delete("9").await.unwrap(), UpdateAck::new(0, 0));

        assert!(!store.exists("1").await.unwrap());
        assert!(store.find(&StudentQuery::active()).await.unwrap().is_empty());

        let raw = store.find_raw("1").await.unwrap().unwrap();
        assert!(raw.is_deleted);
        assert_eq!(store.count_all().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_deleted_student_still_occupies_id() {
        let store = MemoryStudentStore::new();
        store.insert(record("1", "a@example.com")).await.unwrap();
        store.soft_delete("1").await.unwrap();

        let err = store.insert(record("1", "b@example.com")).await.unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_population_expands_references() {
        let store = MemoryStudentStore::new();
        let faculty = store.add_faculty("Faculty of Engineering").await;
        let department = store
            .add_department("Computer Science", faculty.id)
            .await
            .unwrap();
        let semester = store
            .add_semester(SemesterName::Fall, "2030", Month::September, Month::December)
            .await;

        let mut rec = record("1", "a@example.com");
        rec.profile.admission_semester = Some(semester.id);
        rec.profile.academic_department = Some(department.id);
        store.insert(rec).await.unwrap();

        let student = store
            .find_one(&StudentQuery::active().with_id("1"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(student.admission_semester, Some(semester));
        let populated = student.academic_department.unwrap();
        assert_eq!(populated.id, department.id);
        assert_eq!(populated.academic_faculty, faculty);
    }

    #[tokio::test]
    async fn test_unknown_references_are_rejected() {
        let store = MemoryStudentStore::new();

        let mut rec = record("1", "a@example.com");
        rec.profile.academic_department = Some(AcademicDepartmentId::new());
        let err = store.insert(rec).await.unwrap_err();
        assert_eq!(err.details[0].path, "academicDepartment");

        let mut rec = record("1", "a@example.com");
        rec.profile.admission_semester = Some(AcademicSemesterId::new());
        let err = store.insert(rec).await.unwrap_err();
        assert_eq!(err.details[0].path, "admissionSemester");

        assert_eq!(store.count_all().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_department_requires_known_faculty() {
        let store = MemoryStudentStore::new();
        assert!(
            store
                .add_department("Orphan", AcademicFacultyId::new())
                .await
                .is_err()
        );
    }
}
