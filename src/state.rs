use crate::calendar::CalendarView;
use crate::repository::{ProjectRepository, Repository, TaskRepository};
use crate::store::DocumentStore;
use crate::views::{ListView, ProjectView, TaskView};
use chrono::Local;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub tasks: TaskRepository,
    pub projects: ProjectRepository,
    pub task_view: Arc<Mutex<TaskView>>,
    pub project_view: Arc<Mutex<ProjectView>>,
    pub calendar: Arc<Mutex<CalendarView>>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        let tasks: TaskRepository = Repository::new(Arc::clone(&store));
        let projects: ProjectRepository = Repository::new(store);
        Self {
            task_view: Arc::new(Mutex::new(ListView::new(tasks.clone()))),
            project_view: Arc::new(Mutex::new(ListView::new(projects.clone()))),
            calendar: Arc::new(Mutex::new(CalendarView::new(Local::now().date_naive()))),
            tasks,
            projects,
        }
    }
}
