//! Academic reference data seeding.
//!
//! Students can only point at semesters and departments that exist, so a fresh
//! database needs at least one faculty, department and semester before
//! populated reads show anything. Seeding is idempotent: re-running with the
//! same names returns the existing rows.

use anyhow::{Context, bail};
use sqlx::PgPool;
use varsity_models::{AcademicDepartment, AcademicFaculty, AcademicSemester, Month, SemesterName};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcademicSeed {
    pub faculty: String,
    pub department: String,
    pub semester: SemesterName,
    pub year: String,
    pub start_month: Month,
    pub end_month: Month,
}

impl Default for AcademicSeed {
    fn default() -> Self {
        Self {
            faculty: "Faculty of Engineering".to_string(),
            department: "Department of Computer Science and Engineering".to_string(),
            semester: SemesterName::Autumn,
            year: "2030".to_string(),
            start_month: Month::January,
            end_month: Month::April,
        }
    }
}

impl AcademicSeed {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.faculty.trim().is_empty() {
            bail!("faculty name must not be empty");
        }
        if self.department.trim().is_empty() {
            bail!("department name must not be empty");
        }
        if self.year.len() != 4 || !self.year.chars().all(|c| c.is_ascii_digit()) {
            bail!("year must be four digits, got '{}'", self.year);
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct SeededAcademics {
    pub faculty: AcademicFaculty,
    pub department: AcademicDepartment,
    pub semester: AcademicSemester,
}

pub async fn seed_academics(pool: &PgPool, seed: &AcademicSeed) -> anyhow::Result<SeededAcademics> {
    seed.validate()?;

    let mut tx = pool.begin().await.context("Failed to start transaction")?;

    // DO UPDATE instead of DO NOTHING so RETURNING yields the existing row.
    let faculty = sqlx::query_as::<_, AcademicFaculty>(
        r#"
        INSERT INTO academic_faculties (name)
        VALUES ($1)
        ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
        RETURNING id, name, created_at, updated_at
        "#,
    )
    .bind(seed.faculty.trim())
    .fetch_one(&mut *tx)
    .await
    .context("Failed to seed academic faculty")?;

    let department = sqlx::query_as::<_, AcademicDepartment>(
        r#"
        INSERT INTO academic_departments (name, academic_faculty)
        VALUES ($1, $2)
        ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
        RETURNING id, name, academic_faculty, created_at, updated_at
        "#,
    )
    .bind(seed.department.trim())
    .bind(faculty.id)
    .fetch_one(&mut *tx)
    .await
    .context("Failed to seed academic department")?;

    let semester = sqlx::query_as::<_, AcademicSemester>(
        r#"
        INSERT INTO academic_semesters (name, code, year, start_month, end_month)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (name, year) DO UPDATE SET name = EXCLUDED.name
        RETURNING id, name, code, year, start_month, end_month, created_at, updated_at
        "#,
    )
    .bind(seed.semester)
    .bind(seed.semester.code())
    .bind(&seed.year)
    .bind(seed.start_month)
    .bind(seed.end_month)
    .fetch_one(&mut *tx)
    .await
    .context("Failed to seed academic semester")?;

    tx.commit().await.context("Failed to commit seed")?;

    Ok(SeededAcademics {
        faculty,
        department,
        semester,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_seed_is_valid() {
        assert!(AcademicSeed::default().validate().is_ok());
    }

    #[test]
    fn test_year_must_be_four_digits() {
        let seed = AcademicSeed {
            year: "30".to_string(),
            ..AcademicSeed::default()
        };
        assert!(seed.validate().is_err());

        let seed = AcademicSeed {
            year: "20x0".to_string(),
            ..AcademicSeed::default()
        };
        assert!(seed.validate().is_err());
    }

    #[test]
    fn test_blank_names_are_rejected() {
        let seed = AcademicSeed {
            department: "   ".to_string(),
            ..AcademicSeed::default()
        };
        assert!(seed.validate().is_err());
    }
}
