//! Server-rendered pages. Each `GET` is a page activation; each `POST` is one
//! UI intent applied to the page's view and answered with a redirect back.

use crate::models::{ProjectDraft, ProjectPatch, TaskDraft, TaskPatch};
use crate::state::AppState;
use crate::stats::fetch_dashboard;
use crate::ui::{render_calendar, render_dashboard, render_projects, render_tasks};
use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form,
};
use chrono::Local;
use tracing::error;

pub async fn dashboard(State(state): State<AppState>) -> Html<String> {
    match fetch_dashboard(&state.tasks, &state.projects).await {
        Ok(stats) => Html(render_dashboard(Ok(&stats))),
        Err(err) => {
            error!("dashboard load failed: {err}");
            Html(render_dashboard(Err(err.to_string())))
        }
    }
}

pub async fn tasks(State(state): State<AppState>) -> Html<String> {
    let mut view = state.task_view.lock().await;
    view.activate().await;
    Html(render_tasks(&view))
}

pub async fn task_add(State(state): State<AppState>, Form(draft): Form<TaskDraft>) -> Redirect {
    state.task_view.lock().await.add(draft).await;
    Redirect::to("/tasks")
}

pub async fn task_toggle(State(state): State<AppState>, Path(id): Path<String>) -> Redirect {
    state.task_view.lock().await.toggle(&id).await;
    Redirect::to("/tasks")
}

pub async fn task_edit(State(state): State<AppState>, Path(id): Path<String>) -> Redirect {
    state.task_view.lock().await.begin_edit(&id);
    Redirect::to("/tasks")
}

pub async fn task_save(State(state): State<AppState>, Form(form): Form<TaskDraft>) -> Redirect {
    let patch = TaskPatch {
        text: Some(form.text),
        completed: None,
    };
    state.task_view.lock().await.save(patch).await;
    Redirect::to("/tasks")
}

pub async fn task_cancel(State(state): State<AppState>) -> Redirect {
    state.task_view.lock().await.cancel();
    Redirect::to("/tasks")
}

pub async fn task_delete(State(state): State<AppState>, Path(id): Path<String>) -> Redirect {
    state.task_view.lock().await.request_delete(&id).await;
    Redirect::to("/tasks")
}

pub async fn projects(State(state): State<AppState>) -> Html<String> {
    let mut view = state.project_view.lock().await;
    view.activate().await;
    Html(render_projects(&view))
}

pub async fn project_add(
    State(state): State<AppState>,
    Form(draft): Form<ProjectDraft>,
) -> Redirect {
    state.project_view.lock().await.add(draft).await;
    Redirect::to("/projects")
}

pub async fn project_edit(State(state): State<AppState>, Path(id): Path<String>) -> Redirect {
    state.project_view.lock().await.begin_edit(&id);
    Redirect::to("/projects")
}

pub async fn project_save(
    State(state): State<AppState>,
    Form(form): Form<ProjectDraft>,
) -> Redirect {
    let patch = ProjectPatch {
        name: Some(form.name),
        description: Some(form.description),
    };
    state.project_view.lock().await.save(patch).await;
    Redirect::to("/projects")
}

/// Closes whichever project dialog is open.
pub async fn project_cancel(State(state): State<AppState>) -> Redirect {
    state.project_view.lock().await.cancel();
    Redirect::to("/projects")
}

pub async fn project_delete(State(state): State<AppState>, Path(id): Path<String>) -> Redirect {
    state.project_view.lock().await.request_delete(&id).await;
    Redirect::to("/projects")
}

pub async fn project_delete_confirm(State(state): State<AppState>) -> Redirect {
    state.project_view.lock().await.confirm_delete().await;
    Redirect::to("/projects")
}

pub async fn calendar(State(state): State<AppState>) -> Html<String> {
    let grid = state.calendar.lock().await.grid();
    Html(render_calendar(&grid, Local::now().date_naive()))
}

pub async fn calendar_prev(State(state): State<AppState>) -> Redirect {
    state.calendar.lock().await.change_month(-1);
    Redirect::to("/calendar")
}

pub async fn calendar_next(State(state): State<AppState>) -> Redirect {
    state.calendar.lock().await.change_month(1);
    Redirect::to("/calendar")
}
