use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::PgPool;
use tower::ServiceExt;
use varsity::modules::students::{MemoryStudentStore, PgStudentStore};
use varsity::router::init_router;
use varsity::state::AppState;
use varsity_config::{CorsConfig, PasswordConfig};
use varsity_models::{Month, SemesterName};

pub struct TestApp {
    pub router: axum::Router,
    pub store: Arc<MemoryStudentStore>,
}

#[allow(dead_code)]
pub struct TestAcademics {
    pub faculty_id: String,
    pub department_id: String,
    pub semester_id: String,
}

#[allow(dead_code)]
pub struct PgTestApp {
    pub router: axum::Router,
    pub store: Arc<PgStudentStore>,
}

#[allow(dead_code)]
pub fn setup_test_app() -> TestApp {
    let store = Arc::new(MemoryStudentStore::new());
    let state = AppState::new(
        store.clone(),
        // Lowest bcrypt cost keeps the suite fast.
        PasswordConfig::with_salt_rounds(4),
        CorsConfig::default(),
    );

    TestApp {
        router: init_router(state),
        store,
    }
}

#[allow(dead_code)]
pub fn setup_pg_test_app(pool: PgPool) -> PgTestApp {
    let store = Arc::new(PgStudentStore::new(pool));
    let state = AppState::new(
        store.clone(),
        PasswordConfig::with_salt_rounds(4),
        CorsConfig::default(),
    );

    PgTestApp {
        router: init_router(state),
        store,
    }
}

#[allow(dead_code)]
pub async fn seed_academics(store: &MemoryStudentStore) -> TestAcademics {
    let faculty = store.add_faculty("Faculty of Engineering").await;
    let department = store
        .add_department("Computer Science", faculty.id)
        .await
        .unwrap();
    let semester = store
        .add_semester(SemesterName::Autumn, "2030", Month::January, Month::April)
        .await;

    TestAcademics {
        faculty_id: faculty.id.to_string(),
        department_id: department.id.to_string(),
        semester_id: semester.id.to_string(),
    }
}

#[allow(dead_code)]
pub async fn seed_pg_academics(pool: &PgPool) -> TestAcademics {
    let faculty_id: uuid::Uuid = sqlx::query_scalar(
        "INSERT INTO academic_faculties (name) VALUES ($1) RETURNING id",
    )
    .bind("Faculty of Engineering")
    .fetch_one(pool)
    .await
    .unwrap();

    let department_id: uuid::Uuid = sqlx::query_scalar(
        "INSERT INTO academic_departments (name, academic_faculty) VALUES ($1, $2) RETURNING id",
    )
    .bind("Computer Science")
    .bind(faculty_id)
    .fetch_one(pool)
    .await
    .unwrap();

    let semester_id: uuid::Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO academic_semesters (name, code, year, start_month, end_month)
        VALUES ('Autumn', '01', '2030', 'January', 'April')
        RETURNING id
        "#,
    )
    .fetch_one(pool)
    .await
    .unwrap();

    TestAcademics {
        faculty_id: faculty_id.to_string(),
        department_id: department_id.to_string(),
        semester_id: semester_id.to_string(),
    }
}

#[allow(dead_code)]
pub fn student_payload(id: &str, email: &str) -> Value {
    json!({
        "id": id,
        "password": "student123",
        "name": { "firstName": "Mezba", "lastName": "Abedin" },
        "gender": "male",
        "dateOfBirth": "1999-05-12",
        "email": email,
        "contactNo": "01700000000",
        "emergencyContactNo": "01800000000",
        "bloodGroup": "O+",
        "presentAddress": "Dhaka",
        "permanentAddress": "Chittagong",
        "guardian": {
            "fatherName": "Rahim",
            "fatherOccupation": "Engineer",
            "fatherContactNo": "01900000000",
            "motherName": "Karima",
            "motherOccupation": "Teacher",
            "motherContactNo": "01600000000"
        },
        "localGuardian": {
            "name": "Karim",
            "occupation": "Doctor",
            "contactNo": "01500000000",
            "address": "Sylhet"
        }
    })
}

pub async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, body)
}

#[allow(dead_code)]
pub async fn create_student(app: &axum::Router, id: &str, email: &str) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/api/v1/students",
        Some(student_payload(id, email)),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create failed: {}", body);
    body["data"].clone()
}
