//! JSON API over the repositories. Every write answers with the re-listed
//! collection.

use crate::calendar::{month_grid, MonthGrid};
use crate::errors::{AppError, StoreError};
use crate::models::{Project, ProjectDraft, ProjectPatch, Task, TaskDraft, TaskPatch};
use crate::repository::{Entity, Outcome, Repository};
use crate::state::AppState;
use crate::stats::{fetch_dashboard, DashboardStats};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{Datelike, Local, NaiveDate};
use serde::Deserialize;

pub async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>, AppError> {
    Ok(Json(state.tasks.list().await?))
}

pub async fn create_task(
    State(state): State<AppState>,
    Json(draft): Json<TaskDraft>,
) -> Result<Json<Vec<Task>>, AppError> {
    create(&state.tasks, &draft).await
}

pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<TaskPatch>,
) -> Result<Json<Vec<Task>>, AppError> {
    update(&state.tasks, &id, &patch).await
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Task>>, AppError> {
    Ok(Json(state.tasks.remove(&id).await?))
}

pub async fn toggle_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Task>>, AppError> {
    let tasks = state.tasks.list().await?;
    let task = tasks
        .iter()
        .find(|task| task.id == id)
        .ok_or_else(|| StoreError::not_found(Task::COLLECTION, &id))?;
    Ok(Json(state.tasks.toggle_completed(task).await?))
}

pub async fn list_projects(State(state): State<AppState>) -> Result<Json<Vec<Project>>, AppError> {
    Ok(Json(state.projects.list().await?))
}

pub async fn create_project(
    State(state): State<AppState>,
    Json(draft): Json<ProjectDraft>,
) -> Result<Json<Vec<Project>>, AppError> {
    create(&state.projects, &draft).await
}

pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<ProjectPatch>,
) -> Result<Json<Vec<Project>>, AppError> {
    update(&state.projects, &id, &patch).await
}

pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Project>>, AppError> {
    Ok(Json(state.projects.remove(&id).await?))
}

pub async fn get_dashboard(State(state): State<AppState>) -> Result<Json<DashboardStats>, AppError> {
    Ok(Json(fetch_dashboard(&state.tasks, &state.projects).await?))
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

pub async fn get_calendar(Query(query): Query<CalendarQuery>) -> Result<Json<MonthGrid>, AppError> {
    let today = Local::now().date_naive();
    let year = query.year.unwrap_or(today.year());
    let month = query.month.unwrap_or(today.month());
    let reference = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::bad_request(format!("no such month: {year}-{month}")))?;
    Ok(Json(month_grid(reference)))
}

async fn create<E: Entity + serde::Serialize>(
    repo: &Repository<E>,
    draft: &E::Draft,
) -> Result<Json<Vec<E>>, AppError> {
    match repo.create(draft).await? {
        Outcome::Refreshed(items) => Ok(Json(items)),
        Outcome::Skipped => Err(blank_text::<E>()),
    }
}

async fn update<E: Entity + serde::Serialize>(
    repo: &Repository<E>,
    id: &str,
    patch: &E::Patch,
) -> Result<Json<Vec<E>>, AppError> {
    match repo.update(id, patch).await? {
        Outcome::Refreshed(items) => Ok(Json(items)),
        Outcome::Skipped => Err(blank_text::<E>()),
    }
}

fn blank_text<E: Entity>() -> AppError {
    AppError::bad_request(format!("{} text must not be blank", E::LABEL))
}
