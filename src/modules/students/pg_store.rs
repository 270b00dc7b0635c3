use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::instrument;
use varsity_core::AppError;
use varsity_models::{
    AcademicDepartmentId, AcademicFacultyId, AcademicSemesterId, Month, SemesterCode,
    SemesterName,
};

use super::model::{
    AcademicFaculty, AcademicSemester, NewStudentRecord, PopulatedDepartment, StoredStudent,
    Student, StudentQuery, UpdateAck,
};
use super::store::{
    StudentStore, duplicate_email, duplicate_id, duplicate_user, unknown_department,
    unknown_semester,
};

const STUDENT_COLUMNS: &str = "id, user_id, password, name, gender, date_of_birth, email, \
    contact_no, emergency_contact_no, blood_group, present_address, permanent_address, \
    guardian, local_guardian, profile_img, admission_semester, academic_department, \
    is_active, is_deleted, created_at, updated_at";

// Semester, department and faculty columns are aliased so they can sit
// beside the flattened student columns in one row.
const POPULATED_SELECT: &str = r#"
    SELECT
        s.id, s.user_id, s.password, s.name, s.gender, s.date_of_birth, s.email,
        s.contact_no, s.emergency_contact_no, s.blood_group, s.present_address,
        s.permanent_address, s.guardian, s.local_guardian, s.profile_img,
        s.admission_semester, s.academic_department, s.is_active, s.is_deleted,
        s.created_at, s.updated_at,
        sem.id AS sem_id, sem.name AS sem_name, sem.code AS sem_code, sem.year AS sem_year,
        sem.start_month AS sem_start_month, sem.end_month AS sem_end_month,
        sem.created_at AS sem_created_at, sem.updated_at AS sem_updated_at,
        d.id AS department_id, d.name AS department_name,
        d.created_at AS department_created_at, d.updated_at AS department_updated_at,
        f.id AS faculty_id, f.name AS faculty_name,
        f.created_at AS faculty_created_at, f.updated_at AS faculty_updated_at
    FROM students s
    LEFT JOIN academic_semesters sem ON sem.id = s.admission_semester
    LEFT JOIN academic_departments d ON d.id = s.academic_department
    LEFT JOIN academic_faculties f ON f.id = d.academic_faculty
"#;

#[derive(FromRow)]
struct PopulatedRow {
    #[sqlx(flatten)]
    student: StoredStudent,
    sem_id: Option<AcademicSemesterId>,
    sem_name: Option<SemesterName>,
    sem_code: Option<SemesterCode>,
    sem_year: Option<String>,
    sem_start_month: Option<Month>,
    sem_end_month: Option<Month>,
    sem_created_at: Option<DateTime<Utc>>,
    sem_updated_at: Option<DateTime<Utc>>,
    department_id: Option<AcademicDepartmentId>,
    department_name: Option<String>,
    department_created_at: Option<DateTime<Utc>>,
    department_updated_at: Option<DateTime<Utc>>,
    faculty_id: Option<AcademicFacultyId>,
    faculty_name: Option<String>,
    faculty_created_at: Option<DateTime<Utc>>,
    faculty_updated_at: Option<DateTime<Utc>>,
}

impl PopulatedRow {
    fn semester(&mut self) -> Option<AcademicSemester> {
        Some(AcademicSemester {
            id: self.sem_id?,
            name: self.sem_name?,
            code: self.sem_code?,
            year: self.sem_year.take()?,
            start_month: self.sem_start_month?,
            end_month: self.sem_end_month?,
            created_at: self.sem_created_at?,
            updated_at: self.sem_updated_at?,
        })
    }

    fn department(&mut self) -> Option<PopulatedDepartment> {
        let faculty = AcademicFaculty {
            id: self.faculty_id?,
            name: self.faculty_name.take()?,
            created_at: self.faculty_created_at?,
            updated_at: self.faculty_updated_at?,
        };

        Some(PopulatedDepartment {
            id: self.department_id?,
            name: self.department_name.take()?,
            academic_faculty: faculty,
            created_at: self.department_created_at?,
            updated_at: self.department_updated_at?,
        })
    }

    fn into_student(mut self) -> Student {
        let semester = self.semester();
        let department = self.department();
        self.student.into_student(semester, department)
    }
}

/// Student store backed by the `students` table.
#[derive(Clone, Debug)]
pub struct PgStudentStore {
    pool: PgPool,
}

impl PgStudentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn populated_query(query: &StudentQuery) -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::<Postgres>::new(POPULATED_SELECT);
        let mut separator = " WHERE ";

        if let Some(predicate) = query.scope.sql_predicate("s") {
            builder.push(separator).push(predicate);
            separator = " AND ";
        }

        if let Some(id) = &query.id {
            builder.push(separator).push("s.id = ").push_bind(id.clone());
        }

        builder.push(" ORDER BY s.created_at, s.id");
        builder
    }
}

fn map_insert_error(err: sqlx::Error, record: &NewStudentRecord) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return match db_err.constraint() {
                Some("students_email_key") => duplicate_email(&record.profile.email),
                Some("students_user_id_key") => duplicate_user(),
                _ => duplicate_id(&record.profile.id),
            };
        }

        if db_err.is_foreign_key_violation() {
            match db_err.constraint() {
                Some("students_admission_semester_fkey") => return unknown_semester(),
                Some("students_academic_department_fkey") => return unknown_department(),
                _ => {}
            }
        }
    }

    AppError::database(anyhow::Error::from(err).context("Failed to insert student"))
}

#[async_trait]
impl StudentStore for PgStudentStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    #[instrument(skip(self))]
    async fn find(&self, query: &StudentQuery) -> Result<Vec<Student>, AppError> {
        let rows = Self::populated_query(query)
            .build_query_as::<PopulatedRow>()
            .fetch_all(&self.pool)
            .await
            .context("Failed to fetch students")
            .map_err(AppError::database)?;

        Ok(rows.into_iter().map(PopulatedRow::into_student).collect())
    }

    #[instrument(skip(self))]
    async fn find_one(&self, query: &StudentQuery) -> Result<Option<Student>, AppError> {
        let row = Self::populated_query(query)
            .build_query_as::<PopulatedRow>()
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch student")
            .map_err(AppError::database)?;

        Ok(row.map(PopulatedRow::into_student))
    }

    #[instrument(skip(self))]
    async fn find_raw(&self, id: &str) -> Result<Option<StoredStudent>, AppError> {
        let sql = format!("SELECT {} FROM students WHERE id = $1", STUDENT_COLUMNS);

        sqlx::query_as::<_, StoredStudent>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch stored student")
            .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn exists(&self, id: &str) -> Result<bool, AppError> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM students WHERE id = $1 AND is_deleted = FALSE)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .context("Failed to check student existence")
        .map_err(AppError::database)
    }

    #[instrument(skip(self, record), fields(student_id = %record.profile.id))]
    async fn insert(&self, record: NewStudentRecord) -> Result<StoredStudent, AppError> {
        let sql = format!(
            r#"
            INSERT INTO students (
                id, user_id, password, name, gender, date_of_birth, email, contact_no,
                emergency_contact_no, blood_group, present_address, permanent_address,
                guardian, local_guardian, profile_img, admission_semester,
                academic_department, is_active
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            RETURNING {}
            "#,
            STUDENT_COLUMNS
        );

        let profile = &record.profile;
        let inserted = sqlx::query_as::<_, StoredStudent>(&sql)
            .bind(&profile.id)
            .bind(profile.user)
            .bind(&record.password_hash)
            .bind(Json(&profile.name))
            .bind(profile.gender)
            .bind(&profile.date_of_birth)
            .bind(&profile.email)
            .bind(&profile.contact_no)
            .bind(&profile.emergency_contact_no)
            .bind(profile.blood_group)
            .bind(&profile.present_address)
            .bind(&profile.permanent_address)
            .bind(Json(&profile.guardian))
            .bind(Json(&profile.local_guardian))
            .bind(&profile.profile_img)
            .bind(profile.admission_semester)
            .bind(profile.academic_department)
            .bind(profile.is_active)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_insert_error(e, &record))?;

        Ok(inserted)
    }

    #[instrument(skip(self))]
    async fn soft_delete(&self, id: &str) -> Result<UpdateAck, AppError> {
        // `matched` reads the snapshot taken before the update runs.
        let (matched, modified) = sqlx::query_as::<_, (i64, i64)>(
            r#"
            WITH matched AS (
                SELECT id FROM students WHERE id = $1
            ),
            updated AS (
                UPDATE students
                SET is_deleted = TRUE, updated_at = NOW()
                WHERE id = $1 AND is_deleted = FALSE
                RETURNING id
            )
            SELECT
                (SELECT COUNT(*) FROM matched) AS matched_count,
                (SELECT COUNT(*) FROM updated) AS modified_count
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .context("Failed to delete student")
        .map_err(AppError::database)?;

        Ok(UpdateAck::new(matched as u64, modified as u64))
    }

    #[instrument(skip(self))]
    async fn count_all(&self) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count students")
            .map_err(AppError::database)
    }
}
