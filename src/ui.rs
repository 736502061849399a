use crate::calendar::{Cell, MonthGrid};
use crate::models::{Project, Task};
use crate::stats::{format_count, DashboardStats};
use crate::views::{NoticeKind, ProjectView, TaskView};
use chrono::{Datelike, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Tasks,
    Projects,
    Calendar,
}

impl Page {
    const ALL: [Page; 4] = [Page::Dashboard, Page::Tasks, Page::Projects, Page::Calendar];

    fn href(self) -> &'static str {
        match self {
            Page::Dashboard => "/",
            Page::Tasks => "/tasks",
            Page::Projects => "/projects",
            Page::Calendar => "/calendar",
        }
    }

    fn title(self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Tasks => "Tasks",
            Page::Projects => "Projects",
            Page::Calendar => "Calendar",
        }
    }
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn render_dashboard(stats: Result<&DashboardStats, String>) -> String {
    let body = match stats {
        Ok(stats) => {
            let pending = stats.pending_tasks;
            DASHBOARD_HTML
                .replace("{{TOTAL_TASKS}}", &format_count(stats.total_tasks))
                .replace("{{COMPLETED}}", &format_count(stats.completed_tasks))
                .replace("{{PENDING}}", &format_count(pending))
                .replace("{{PROJECTS}}", &format_count(stats.total_projects))
                .replace("{{RATE}}", &stats.completion_rate.to_string())
                .replace("{{RATIO}}", &stats.project_to_task_ratio)
        }
        Err(message) => format!(
            r#"<section class="notice error">Could not load the dashboard: {}</section>"#,
            escape(&message)
        ),
    };
    layout(Page::Dashboard, "Overview of your projects, tasks and progress", &body, None)
}

pub fn render_tasks(view: &TaskView) -> String {
    let mut body = String::new();
    body.push_str(&format!(
        r#"<form class="card add" method="post" action="/tasks">
  <input name="text" placeholder="Add new task..." value="{}" />
  <button type="submit">Add</button>
</form>
<ul class="list">"#,
        escape(&view.draft().text)
    ));

    for task in view.items() {
        body.push_str(&task_row(task));
    }
    body.push_str("</ul>");

    if let Some(task) = view.selection() {
        body.push_str(&format!(
            r#"<div class="backdrop"><section class="dialog">
  <h2>Edit Task</h2>
  <form method="post" action="/tasks/edit/save">
    <input name="text" value="{}" autofocus />
    <div class="dialog-actions">
      <button type="submit" formaction="/tasks/edit/cancel" class="ghost">Cancel</button>
      <button type="submit">Save</button>
    </div>
  </form>
</section></div>"#,
            escape(&task.text)
        ));
    }

    let notice = view.notice().map(|notice| (notice.kind, notice.message.as_str()));
    layout(Page::Tasks, "Everything on your plate", &body, notice)
}

fn task_row(task: &Task) -> String {
    let id = escape(&task.id);
    let (class, mark) = if task.completed {
        ("done", "&#10003;")
    } else {
        ("", "")
    };
    format!(
        r#"<li class="card row {class}">
  <form method="post" action="/tasks/item/{id}/toggle"><button class="check" type="submit" aria-label="toggle">{mark}</button></form>
  <span class="text">{text}</span>
  <form method="post" action="/tasks/item/{id}/edit"><button class="ghost" type="submit">Edit</button></form>
  <form method="post" action="/tasks/item/{id}/delete"><button class="danger" type="submit">Delete</button></form>
</li>"#,
        text = escape(&task.text),
    )
}

pub fn render_projects(view: &ProjectView) -> String {
    let draft = view.draft();
    let mut body = String::new();
    body.push_str(&format!(
        r#"<form class="card add" method="post" action="/projects">
  <input name="name" placeholder="Project name" value="{}" />
  <input name="description" placeholder="Description" value="{}" />
  <button type="submit">Add Project</button>
</form>
<section class="grid">"#,
        escape(&draft.name),
        escape(&draft.description)
    ));

    for project in view.items() {
        body.push_str(&project_card(project));
    }
    body.push_str("</section>");

    if let Some(project) = view.selection() {
        body.push_str(&format!(
            r#"<div class="backdrop"><section class="dialog">
  <h2>Edit Project</h2>
  <form method="post" action="/projects/edit/save">
    <input name="name" value="{}" autofocus />
    <input name="description" value="{}" />
    <div class="dialog-actions">
      <button type="submit" formaction="/projects/edit/cancel" class="ghost">Cancel</button>
      <button type="submit">Save</button>
    </div>
  </form>
</section></div>"#,
            escape(&project.name),
            escape(&project.description)
        ));
    }

    if let Some(project) = view.delete_target() {
        body.push_str(&format!(
            r#"<div class="backdrop"><section class="dialog">
  <h2>Confirm Delete</h2>
  <p>Are you sure you want to delete the project <strong>{}</strong>?</p>
  <div class="dialog-actions">
    <form method="post" action="/projects/delete/cancel"><button class="ghost" type="submit">Cancel</button></form>
    <form method="post" action="/projects/delete/confirm"><button class="danger" type="submit">Delete</button></form>
  </div>
</section></div>"#,
            escape(&project.name)
        ));
    }

    let notice = view.notice().map(|notice| (notice.kind, notice.message.as_str()));
    layout(Page::Projects, "What you are building", &body, notice)
}

fn project_card(project: &Project) -> String {
    let id = escape(&project.id);
    format!(
        r#"<article class="card project">
  <h3>{name}</h3>
  <p class="muted">{description}</p>
  <div class="row-actions">
    <form method="post" action="/projects/item/{id}/edit"><button class="ghost" type="submit">Edit</button></form>
    <form method="post" action="/projects/item/{id}/delete"><button class="danger" type="submit">Delete</button></form>
  </div>
</article>"#,
        name = escape(&project.name),
        description = escape(&project.description),
    )
}

pub fn render_calendar(grid: &MonthGrid, today: NaiveDate) -> String {
    let is_current = today.year() == grid.year && today.month() == grid.month;
    let mut body = String::new();
    body.push_str(&format!(
        r#"<section class="month-nav">
  <form method="post" action="/calendar/prev"><button class="ghost" type="submit">Previous Month</button></form>
  <h2>{}</h2>
  <form method="post" action="/calendar/next"><button class="ghost" type="submit">Next Month</button></form>
</section>
<section class="calendar">"#,
        escape(&grid.label)
    ));

    for weekday in grid.weekdays {
        body.push_str(&format!(r#"<div class="weekday">{weekday}</div>"#));
    }
    for cell in &grid.cells {
        match cell {
            Cell::Blank => body.push_str(r#"<div class="day blank"></div>"#),
            Cell::Day(day) if is_current && *day == today.day() => {
                body.push_str(&format!(r#"<div class="day today">{day}</div>"#));
            }
            Cell::Day(day) => {
                body.push_str(&format!(r#"<div class="day">{day}</div>"#));
            }
        }
    }
    body.push_str("</section>");

    layout(Page::Calendar, "Month at a glance", &body, None)
}

fn layout(page: Page, subtitle: &str, body: &str, notice: Option<(NoticeKind, &str)>) -> String {
    let mut nav = String::new();
    for item in Page::ALL {
        let class = if item == page { "active" } else { "" };
        nav.push_str(&format!(
            r#"<a class="{class}" href="{}">{}</a>"#,
            item.href(),
            item.title()
        ));
    }

    let notice = match notice {
        Some((kind, message)) => {
            let class = match kind {
                NoticeKind::Success => "success",
                NoticeKind::Error => "error",
            };
            format!(r#"<div class="notice {class}" role="status">{}</div>"#, escape(message))
        }
        None => String::new(),
    };

    let mut html = LAYOUT_HEAD.replace("{{TITLE}}", page.title());
    html.push_str(&format!(
        r#"    <nav>{nav}</nav>
    <header>
      <h1>{}</h1>
      <p class="subtitle">{}</p>
    </header>
"#,
        page.title(),
        escape(subtitle)
    ));
    html.push_str(body);
    html.push_str(&notice);
    html.push_str(LAYOUT_TAIL);
    html
}

const DASHBOARD_HTML: &str = r#"<section class="panel">
  <div class="stat tint-blue">
    <span class="label">Total Tasks</span>
    <span class="value">{{TOTAL_TASKS}}</span>
  </div>
  <div class="stat tint-green">
    <span class="label">Completed Tasks</span>
    <span class="value">{{COMPLETED}}</span>
    <progress max="100" value="{{RATE}}"></progress>
    <span class="caption">{{RATE}}% done</span>
  </div>
  <div class="stat tint-orange">
    <span class="label">Total Projects</span>
    <span class="value">{{PROJECTS}}</span>
  </div>
  <div class="stat tint-purple">
    <span class="label">Task Completion Rate</span>
    <span class="value">{{RATE}}%</span>
  </div>
  <div class="stat tint-pink">
    <span class="label">Project-to-Task Ratio</span>
    <span class="value">{{RATIO}}</span>
  </div>
  <div class="stat">
    <span class="label">Task Status</span>
    <span class="chips"><span class="chip ok">Done: {{COMPLETED}}</span><span class="chip bad">Open: {{PENDING}}</span></span>
  </div>
</section>"#;

const LAYOUT_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}} · Taskboard</title>
  <style>
    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      justify-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(960px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
    }

    nav {
      display: flex;
      gap: 6px;
      padding: 6px;
      background: rgba(47, 72, 88, 0.08);
      border-radius: 999px;
      width: fit-content;
    }

    nav a {
      padding: 8px 14px;
      border-radius: 999px;
      color: #6b645d;
      font-weight: 600;
      text-decoration: none;
    }

    nav a.active {
      background: white;
      color: var(--accent-2);
    }

    h1 {
      font-family: "Georgia", serif;
      margin: 0;
    }

    .subtitle, .muted, .caption {
      margin: 0;
      color: #5f5c57;
    }

    .card, .stat {
      background: white;
      border-radius: 18px;
      padding: 16px 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    .panel, .grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
      gap: 16px;
    }

    .stat {
      display: grid;
      gap: 8px;
    }

    .stat .label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .stat .value {
      font-size: 1.7rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .tint-blue { background: #e3f2fd; }
    .tint-green { background: #e8f5e9; }
    .tint-orange { background: #fff3e0; }
    .tint-purple { background: #ede7f6; }
    .tint-pink { background: #fce4ec; }

    .chips { display: flex; gap: 8px; }
    .chip { border-radius: 999px; padding: 4px 12px; border: 1px solid; }
    .chip.ok { color: #2e7d32; }
    .chip.bad { color: #c62828; }

    form { margin: 0; }

    .add {
      display: flex;
      gap: 10px;
    }

    input {
      flex: 1;
      padding: 12px 14px;
      border-radius: 12px;
      border: 1px solid rgba(47, 72, 88, 0.2);
      font-size: 1rem;
      width: 100%;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 10px 18px;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
    }

    button.ghost { background: transparent; color: var(--accent-2); }
    button.danger { background: transparent; color: #c62828; }

    .list { list-style: none; padding: 0; margin: 0; display: grid; gap: 8px; }
    .row { display: flex; align-items: center; gap: 10px; }
    .row .text { flex: 1; }
    .row.done .text { text-decoration: line-through; color: #8b857d; }
    .row-actions { display: flex; gap: 6px; }

    .check {
      width: 28px;
      height: 28px;
      padding: 0;
      border-radius: 8px;
      background: white;
      color: var(--accent-2);
      border: 2px solid var(--accent-2);
    }

    .backdrop {
      position: fixed;
      inset: 0;
      background: rgba(43, 42, 40, 0.4);
      display: grid;
      place-items: center;
    }

    .dialog {
      background: white;
      border-radius: 18px;
      padding: 24px;
      width: min(420px, 90vw);
      display: grid;
      gap: 12px;
    }

    .dialog form { display: grid; gap: 12px; }
    .dialog-actions { display: flex; justify-content: flex-end; gap: 8px; }

    .notice {
      position: fixed;
      bottom: 24px;
      left: 50%;
      transform: translateX(-50%);
      padding: 12px 20px;
      border-radius: 12px;
      color: white;
      font-weight: 600;
    }

    .notice.success { background: #2e7d32; }
    .notice.error { background: #c62828; }
    section.notice.error { position: static; transform: none; }

    .month-nav { display: flex; justify-content: space-between; align-items: center; }
    .month-nav h2 { margin: 0; }

    .calendar {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 8px;
    }

    .weekday {
      background: var(--accent-2);
      color: white;
      text-align: center;
      border-radius: 10px;
      padding: 6px;
    }

    .day {
      background: white;
      border-radius: 12px;
      height: 80px;
      padding: 10px;
      text-align: center;
    }

    .day.blank { background: transparent; }
    .day.today { border: 2px solid var(--accent); font-weight: 600; }
  </style>
</head>
<body>
  <main class="app">
"#;

const LAYOUT_TAIL: &str = r#"  </main>
  <script>
    const notice = document.querySelector('.notice[role=status]');
    if (notice) {
      setTimeout(() => notice.remove(), 3000);
    }
  </script>
</body>
</html>
"#;
