//! List view controllers for the Tasks and Projects pages.
//!
//! A view owns a transient snapshot of its collection and replaces it
//! wholesale from the repository after every action. Callers hold the view
//! behind a `tokio::sync::Mutex` for the whole of one action, which keeps a
//! single request in flight per entity kind.

use crate::errors::StoreError;
use crate::models::Task;
use crate::repository::{Entity, Outcome, Repository};
use std::time::{Duration, Instant};
use tracing::{error, warn};

pub const NOTICE_TTL: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    expires_at: Instant,
}

impl Notice {
    fn new(kind: NoticeKind, message: String) -> Self {
        Self {
            kind,
            message,
            expires_at: Instant::now() + NOTICE_TTL,
        }
    }

    pub fn is_visible_at(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mode<E> {
    Idle,
    /// Edit dialog open over a copy of the item, carrying unsaved edits.
    Editing(E),
    ConfirmingDelete(E),
}

pub struct ListView<E: Entity> {
    repo: Repository<E>,
    items: Vec<E>,
    draft: E::Draft,
    mode: Mode<E>,
    notice: Option<Notice>,
}

pub type TaskView = ListView<Task>;
pub type ProjectView = ListView<crate::models::Project>;

impl<E: Entity> ListView<E> {
    pub fn new(repo: Repository<E>) -> Self {
        Self {
            repo,
            items: Vec::new(),
            draft: E::Draft::default(),
            mode: Mode::Idle,
            notice: None,
        }
    }

    pub fn items(&self) -> &[E] {
        &self.items
    }

    pub fn draft(&self) -> &E::Draft {
        &self.draft
    }

    pub fn mode(&self) -> &Mode<E> {
        &self.mode
    }

    pub fn selection(&self) -> Option<&E> {
        match &self.mode {
            Mode::Editing(item) => Some(item),
            _ => None,
        }
    }

    pub fn dialog_visible(&self) -> bool {
        matches!(self.mode, Mode::Editing(_))
    }

    pub fn delete_target(&self) -> Option<&E> {
        match &self.mode {
            Mode::ConfirmingDelete(item) => Some(item),
            _ => None,
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice_at(Instant::now())
    }

    pub fn notice_at(&self, now: Instant) -> Option<&Notice> {
        self.notice
            .as_ref()
            .filter(|notice| notice.is_visible_at(now))
    }

    /// Page activation: replaces the snapshot with the current collection.
    pub async fn activate(&mut self) {
        match self.repo.list().await {
            Ok(items) => self.replace_items(items),
            Err(err) => self.fail("load", err),
        }
    }

    pub async fn add(&mut self, draft: E::Draft) {
        self.draft = draft;
        match self.repo.create(&self.draft).await {
            Ok(Outcome::Skipped) => {}
            Ok(Outcome::Refreshed(items)) => {
                self.draft = E::Draft::default();
                self.settle(items);
            }
            Err(err) => self.fail("add", err),
        }
    }

    pub fn begin_edit(&mut self, id: &str) {
        if !matches!(self.mode, Mode::Idle) {
            warn!("ignoring edit of {}/{id}: another dialog is open", E::COLLECTION);
            return;
        }
        match self.find(id) {
            Some(item) => self.mode = Mode::Editing(item),
            None => warn!("ignoring edit of {}/{id}: not in the current list", E::COLLECTION),
        }
    }

    /// Saves the edit dialog. The dialog stays open if the store rejects the
    /// write or the edit would blank the required text.
    pub async fn save(&mut self, patch: E::Patch) {
        let Mode::Editing(item) = &mut self.mode else {
            warn!("ignoring save in {}: no edit in progress", E::COLLECTION);
            return;
        };
        item.apply_patch(&patch);
        let id = item.id().to_string();

        match self.repo.update(&id, &patch).await {
            Ok(Outcome::Skipped) => self.set_notice(
                NoticeKind::Error,
                format!("{} cannot be saved with blank text", E::LABEL),
            ),
            Ok(Outcome::Refreshed(items)) => {
                self.mode = Mode::Idle;
                self.settle(items);
            }
            Err(err) => self.fail("save", err),
        }
    }

    /// Closes either dialog without touching the store.
    pub fn cancel(&mut self) {
        self.mode = Mode::Idle;
    }

    /// Deletes at once, or opens the confirmation dialog for kinds that ask.
    pub async fn request_delete(&mut self, id: &str) {
        if !matches!(self.mode, Mode::Idle) {
            warn!("ignoring delete of {}/{id}: another dialog is open", E::COLLECTION);
            return;
        }
        if E::CONFIRM_DELETE {
            match self.find(id) {
                Some(item) => self.mode = Mode::ConfirmingDelete(item),
                None => warn!("ignoring delete of {}/{id}: not in the current list", E::COLLECTION),
            }
            return;
        }

        match self.repo.remove(id).await {
            Ok(items) => self.settle(items),
            Err(err) => self.fail("delete", err),
        }
    }

    pub async fn confirm_delete(&mut self) {
        let Mode::ConfirmingDelete(item) = &self.mode else {
            warn!("ignoring delete confirmation in {}: nothing pending", E::COLLECTION);
            return;
        };
        let id = item.id().to_string();

        match self.repo.remove(&id).await {
            Ok(items) => {
                self.mode = Mode::Idle;
                self.settle(items);
                self.set_notice(NoticeKind::Success, format!("{} deleted", E::LABEL));
            }
            Err(err) => self.fail("delete", err),
        }
    }

    fn find(&self, id: &str) -> Option<E> {
        self.items.iter().find(|item| item.id() == id).cloned()
    }

    fn replace_items(&mut self, items: Vec<E>) {
        self.items = items;
        let stale = match &self.mode {
            Mode::Idle => None,
            Mode::Editing(item) | Mode::ConfirmingDelete(item) => {
                let id = item.id();
                (!self.items.iter().any(|fresh| fresh.id() == id)).then(|| id.to_string())
            }
        };
        if let Some(id) = stale {
            warn!("{}/{id} vanished from the store; closing its dialog", E::COLLECTION);
            self.mode = Mode::Idle;
        }
    }

    /// A successful write supersedes any earlier failure notice.
    fn settle(&mut self, items: Vec<E>) {
        if matches!(&self.notice, Some(notice) if notice.kind == NoticeKind::Error) {
            self.notice = None;
        }
        self.replace_items(items);
    }

    fn fail(&mut self, action: &str, err: StoreError) {
        error!("{} {action} failed: {err}", E::COLLECTION);
        self.set_notice(
            NoticeKind::Error,
            format!("Could not {action} {}: {err}", E::LABEL.to_lowercase()),
        );
    }

    fn set_notice(&mut self, kind: NoticeKind, message: String) {
        self.notice = Some(Notice::new(kind, message));
    }
}

impl ListView<Task> {
    pub async fn toggle(&mut self, id: &str) {
        let Some(task) = self.find(id) else {
            warn!("ignoring toggle of tasks/{id}: not in the current list");
            return;
        };
        match self.repo.toggle_completed(&task).await {
            Ok(items) => self.settle(items),
            Err(err) => self.fail("update", err),
        }
    }
}
