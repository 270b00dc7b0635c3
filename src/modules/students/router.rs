use crate::modules::students::controller::{
    create_student, delete_student, get_all_students, get_single_student,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_student).get(get_all_students))
        .route(
            "/{student_id}",
            get(get_single_student).delete(delete_student),
        )
}
