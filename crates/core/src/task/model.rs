//! Task model definitions

use serde::{Deserialize, Serialize};

/// Task identifier. Unique, monotonically assigned, never reused.
pub type TaskId = i64;

/// A work item on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub status: String,
}

/// Partial update for a task. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl TaskPatch {
    /// Create an empty patch
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the status
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Set the text
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// True when no field is provided
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.text.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_builder() {
        let patch = TaskPatch::new().with_status("inProgress");
        assert_eq!(patch.status.as_deref(), Some("inProgress"));
        assert!(patch.text.is_none());
        assert!(!patch.is_empty());
        assert!(TaskPatch::new().is_empty());
    }

    #[test]
    fn test_patch_serializes_only_provided_fields() {
        let patch = TaskPatch::new().with_status("inProgress");
        let json = serde_json::to_string(&patch).unwrap();
        assert_eq!(json, r#"{"status":"inProgress"}"#);
    }

    #[test]
    fn test_task_wire_shape() {
        let task = Task {
            id: 7,
            text: "Wire up the frontend".to_string(),
            status: "pending".to_string(),
        };
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 7, "text": "Wire up the frontend", "status": "pending"})
        );
    }
}
