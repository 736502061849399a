mod common;

use common::FakeStore;
use std::sync::Arc;
use std::time::{Duration, Instant};
use taskboard::models::{ProjectDraft, ProjectPatch, TaskDraft, TaskPatch};
use taskboard::repository::Repository;
use taskboard::store::DocumentStore;
use taskboard::views::{ListView, Mode, NoticeKind, ProjectView, TaskView, NOTICE_TTL};

fn task_view(store: Arc<dyn DocumentStore>) -> TaskView {
    ListView::new(Repository::new(store))
}

fn project_view(store: Arc<dyn DocumentStore>) -> ProjectView {
    ListView::new(Repository::new(store))
}

fn task_draft(text: &str) -> TaskDraft {
    TaskDraft { text: text.into() }
}

fn project_draft(name: &str, description: &str) -> ProjectDraft {
    ProjectDraft {
        name: name.into(),
        description: description.into(),
    }
}

#[tokio::test]
async fn activation_loads_the_snapshot() {
    let fake = FakeStore::shared();
    let mut seed = task_view(fake.clone());
    seed.add(task_draft("seeded")).await;

    let mut view = task_view(fake.clone());
    assert!(view.items().is_empty());
    view.activate().await;

    assert_eq!(view.items().len(), 1);
    assert_eq!(view.mode(), &Mode::Idle);
}

#[tokio::test]
async fn add_clears_draft_only_when_created() {
    let mut view = task_view(FakeStore::shared());

    view.add(task_draft("   ")).await;
    assert_eq!(view.draft().text, "   ");
    assert!(view.items().is_empty());

    view.add(task_draft("water plants")).await;
    assert_eq!(view.draft(), &TaskDraft::default());
    assert_eq!(view.items()[0].text, "water plants");
}

#[tokio::test]
async fn edit_save_updates_and_closes_dialog() {
    let mut view = task_view(FakeStore::shared());
    view.add(task_draft("draft email")).await;
    let id = view.items()[0].id.clone();

    view.begin_edit(&id);
    assert!(view.dialog_visible());
    assert_eq!(view.selection().map(|task| task.id.as_str()), Some(id.as_str()));

    view.save(TaskPatch {
        text: Some("send email".into()),
        completed: None,
    })
    .await;

    assert!(!view.dialog_visible());
    assert_eq!(view.items()[0].text, "send email");
    assert_eq!(view.items()[0].id, id);
}

#[tokio::test]
async fn cancel_discards_edit_without_store_call() {
    let fake = FakeStore::shared();
    let mut view = project_view(fake.clone());
    view.add(project_draft("Website", "Relaunch")).await;
    let id = view.items()[0].id.clone();
    let (writes, lists) = (fake.writes(), fake.lists());

    view.begin_edit(&id);
    view.cancel();

    assert_eq!(view.mode(), &Mode::Idle);
    assert_eq!((fake.writes(), fake.lists()), (writes, lists));
    assert_eq!(view.items()[0].name, "Website");
}

#[tokio::test]
async fn edit_of_unknown_id_stays_idle() {
    let mut view = task_view(FakeStore::shared());
    view.begin_edit("not-listed");
    assert_eq!(view.mode(), &Mode::Idle);
}

#[tokio::test]
async fn task_delete_is_immediate() {
    let mut view = task_view(FakeStore::shared());
    view.add(task_draft("obsolete")).await;
    let id = view.items()[0].id.clone();

    view.request_delete(&id).await;

    assert!(view.items().is_empty());
    assert_eq!(view.mode(), &Mode::Idle);
    assert!(view.notice().is_none());
}

#[tokio::test]
async fn project_delete_waits_for_confirmation() {
    let fake = FakeStore::shared();
    let mut view = project_view(fake.clone());
    view.add(project_draft("Old site", "")).await;
    let id = view.items()[0].id.clone();
    let writes = fake.writes();

    view.request_delete(&id).await;
    assert_eq!(view.delete_target().map(|p| p.id.as_str()), Some(id.as_str()));
    assert_eq!(fake.writes(), writes);
    assert_eq!(view.items().len(), 1);

    view.confirm_delete().await;

    assert!(view.items().is_empty());
    assert_eq!(view.mode(), &Mode::Idle);
    let notice = view.notice().expect("success notice");
    assert_eq!(notice.kind, NoticeKind::Success);
    assert_eq!(notice.message, "Project deleted");
}

#[tokio::test]
async fn project_delete_cancel_keeps_project() {
    let fake = FakeStore::shared();
    let mut view = project_view(fake.clone());
    view.add(project_draft("Keep me", "")).await;
    let id = view.items()[0].id.clone();
    let writes = fake.writes();

    view.request_delete(&id).await;
    view.cancel();

    assert_eq!(view.mode(), &Mode::Idle);
    assert_eq!(view.items().len(), 1);
    assert_eq!(fake.writes(), writes);
}

#[tokio::test]
async fn notice_expires_after_ttl() {
    let mut view = project_view(FakeStore::shared());
    view.add(project_draft("Short lived", "")).await;
    let id = view.items()[0].id.clone();
    view.request_delete(&id).await;
    view.confirm_delete().await;

    let now = Instant::now();
    assert!(view.notice_at(now).is_some());
    assert!(view.notice_at(now + NOTICE_TTL + Duration::from_millis(1)).is_none());
}

#[tokio::test]
async fn write_failure_surfaces_error_notice() {
    let fake = FakeStore::shared();
    let mut view = task_view(fake.clone());
    view.add(task_draft("first")).await;
    let id = view.items()[0].id.clone();

    fake.fail_writes(true);
    view.begin_edit(&id);
    view.save(TaskPatch {
        text: Some("renamed".into()),
        completed: None,
    })
    .await;

    let notice = view.notice().expect("error notice");
    assert_eq!(notice.kind, NoticeKind::Error);
    // The dialog stays open with the unsaved edit so it can be retried.
    assert_eq!(view.selection().map(|task| task.text.as_str()), Some("renamed"));
    assert_eq!(view.items()[0].text, "first");

    fake.fail_writes(false);
    view.save(TaskPatch {
        text: Some("renamed".into()),
        completed: None,
    })
    .await;
    assert!(!view.dialog_visible());
    assert_eq!(view.items()[0].text, "renamed");
    assert!(view.notice().is_none());
}

#[tokio::test]
async fn retry_after_failure_clears_error_notice() {
    let fake = FakeStore::shared();
    let mut view = task_view(fake.clone());

    fake.fail_writes(true);
    view.add(task_draft("retry me")).await;
    assert_eq!(view.notice().map(|notice| notice.kind), Some(NoticeKind::Error));
    assert_eq!(view.draft().text, "retry me");

    fake.fail_writes(false);
    view.add(task_draft("retry me")).await;
    assert_eq!(view.items().len(), 1);
    assert!(view.notice().is_none());
}

#[tokio::test]
async fn project_delete_after_failure_shows_only_success() {
    let fake = FakeStore::shared();
    let mut view = project_view(fake.clone());
    view.add(project_draft("Shed", "")).await;
    let id = view.items()[0].id.clone();

    view.request_delete(&id).await;
    fake.fail_writes(true);
    view.confirm_delete().await;
    assert_eq!(view.notice().map(|notice| notice.kind), Some(NoticeKind::Error));

    fake.fail_writes(false);
    view.confirm_delete().await;
    let notice = view.notice().expect("success notice");
    assert_eq!(notice.kind, NoticeKind::Success);
    assert_eq!(notice.message, "Project deleted");
    assert!(view.items().is_empty());
}

#[tokio::test]
async fn load_failure_keeps_previous_snapshot() {
    let fake = FakeStore::shared();
    let mut view = task_view(fake.clone());
    view.add(task_draft("cached")).await;

    fake.fail_lists(true);
    view.activate().await;

    assert_eq!(view.items().len(), 1);
    assert_eq!(view.notice().map(|notice| notice.kind), Some(NoticeKind::Error));
}

#[tokio::test]
async fn refresh_closes_dialog_for_vanished_item() {
    let fake = FakeStore::shared();
    let mut view = project_view(fake.clone());
    let mut other_tab = project_view(fake.clone());
    view.add(project_draft("Doomed", "")).await;
    let id = view.items()[0].id.clone();

    view.begin_edit(&id);
    other_tab.activate().await;
    other_tab.request_delete(&id).await;
    other_tab.confirm_delete().await;

    view.activate().await;

    assert!(view.items().is_empty());
    assert_eq!(view.mode(), &Mode::Idle);
}

#[tokio::test]
async fn toggle_twice_is_an_involution() {
    let mut view = task_view(FakeStore::shared());
    view.add(task_draft("laundry")).await;
    let id = view.items()[0].id.clone();

    view.toggle(&id).await;
    assert!(view.items()[0].completed);
    view.toggle(&id).await;
    assert!(!view.items()[0].completed);
}

#[tokio::test]
async fn project_save_with_blank_name_keeps_dialog_open() {
    let fake = FakeStore::shared();
    let mut view = project_view(fake.clone());
    view.add(project_draft("Named", "desc")).await;
    let id = view.items()[0].id.clone();
    let writes = fake.writes();

    view.begin_edit(&id);
    view.save(ProjectPatch {
        name: Some(" ".into()),
        description: Some("new desc".into()),
    })
    .await;

    assert!(view.dialog_visible());
    assert_eq!(fake.writes(), writes);
    assert_eq!(view.notice().map(|notice| notice.kind), Some(NoticeKind::Error));
}
