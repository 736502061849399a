use crate::handlers;
use crate::pages;
use crate::state::AppState;
use axum::{
    routing::{get, patch, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::dashboard))
        .route("/tasks", get(pages::tasks).post(pages::task_add))
        .route("/tasks/item/:id/toggle", post(pages::task_toggle))
        .route("/tasks/item/:id/edit", post(pages::task_edit))
        .route("/tasks/item/:id/delete", post(pages::task_delete))
        .route("/tasks/edit/save", post(pages::task_save))
        .route("/tasks/edit/cancel", post(pages::task_cancel))
        .route("/projects", get(pages::projects).post(pages::project_add))
        .route("/projects/item/:id/edit", post(pages::project_edit))
        .route("/projects/item/:id/delete", post(pages::project_delete))
        .route("/projects/edit/save", post(pages::project_save))
        .route("/projects/edit/cancel", post(pages::project_cancel))
        .route("/projects/delete/confirm", post(pages::project_delete_confirm))
        .route("/projects/delete/cancel", post(pages::project_cancel))
        .route("/calendar", get(pages::calendar))
        .route("/calendar/prev", post(pages::calendar_prev))
        .route("/calendar/next", post(pages::calendar_next))
        .route("/api/tasks", get(handlers::list_tasks).post(handlers::create_task))
        .route(
            "/api/tasks/:id",
            patch(handlers::update_task).delete(handlers::delete_task),
        )
        .route("/api/tasks/:id/toggle", post(handlers::toggle_task))
        .route(
            "/api/projects",
            get(handlers::list_projects).post(handlers::create_project),
        )
        .route(
            "/api/projects/:id",
            patch(handlers::update_project).delete(handlers::delete_project),
        )
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/calendar", get(handlers::get_calendar))
        .with_state(state)
}
