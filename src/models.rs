use crate::repository::Entity;
use crate::store::{Document, Fields};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

/// Input buffer for a new task.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TaskDraft {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TaskPatch {
    pub text: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProjectDraft {
    #[serde(default)]
    pub name: String,
    /// Free text, stored as typed. Only `name` is trimmed.
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl Entity for Task {
    const COLLECTION: &'static str = "tasks";
    const LABEL: &'static str = "Task";
    const CONFIRM_DELETE: bool = false;

    type Draft = TaskDraft;
    type Patch = TaskPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn draft_fields(draft: &TaskDraft) -> Option<Fields> {
        let text = required(&draft.text)?;
        let mut fields = Fields::new();
        fields.insert("text".into(), Value::from(text));
        fields.insert("completed".into(), Value::Bool(false));
        Some(fields)
    }

    fn patch_fields(patch: &TaskPatch) -> Option<Fields> {
        let mut fields = Fields::new();
        if let Some(text) = &patch.text {
            fields.insert("text".into(), Value::from(required(text)?));
        }
        if let Some(completed) = patch.completed {
            fields.insert("completed".into(), Value::Bool(completed));
        }
        Some(fields)
    }

    fn apply_patch(&mut self, patch: &TaskPatch) {
        if let Some(text) = &patch.text {
            self.text = text.clone();
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
    }

    fn from_document(document: Document) -> Result<Self, serde_json::Error> {
        serde_json::from_value(with_id(document))
    }
}

impl Entity for Project {
    const COLLECTION: &'static str = "projects";
    const LABEL: &'static str = "Project";
    const CONFIRM_DELETE: bool = true;

    type Draft = ProjectDraft;
    type Patch = ProjectPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn draft_fields(draft: &ProjectDraft) -> Option<Fields> {
        let name = required(&draft.name)?;
        let mut fields = Fields::new();
        fields.insert("name".into(), Value::from(name));
        fields.insert("description".into(), Value::from(draft.description.as_str()));
        Some(fields)
    }

    fn patch_fields(patch: &ProjectPatch) -> Option<Fields> {
        let mut fields = Fields::new();
        if let Some(name) = &patch.name {
            fields.insert("name".into(), Value::from(required(name)?));
        }
        if let Some(description) = &patch.description {
            fields.insert("description".into(), Value::from(description.as_str()));
        }
        Some(fields)
    }

    fn apply_patch(&mut self, patch: &ProjectPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
    }

    fn from_document(document: Document) -> Result<Self, serde_json::Error> {
        serde_json::from_value(with_id(document))
    }
}

fn required(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

// The store-assigned id always wins over any stored "id" field.
fn with_id(document: Document) -> Value {
    let mut fields = document.fields;
    fields.insert("id".into(), Value::String(document.id));
    Value::Object(fields)
}
