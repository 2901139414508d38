use serde::{Deserialize, Deserializer, Serialize};

/// Status envelope the archive wraps around every response.
///
/// The upstream convention: a response is logically successful when the
/// numeric `code` equals 200 OR the boolean `success` flag is set. The two
/// indicators are not required to agree.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    pub fn is_success(&self) -> bool {
        self.code == Some(200) || self.success == Some(true)
    }

    /// Server-provided failure message, or the stock placeholder.
    pub fn failure_message(&self) -> &str {
        self.message.as_deref().unwrap_or("未知错误")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Article {
    #[serde(default, deserialize_with = "de_opt_string_or_number")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    // The archive is inconsistent about numeric fields: depending on the
    // route they arrive as JSON numbers or strings. Normalize to strings.
    #[serde(rename = "authorId", default, deserialize_with = "de_opt_string_or_number")]
    pub author_id: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string_or_number")]
    pub upvote: Option<String>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub content: Option<String>,

    #[serde(default)]
    pub category: Option<i64>,
    #[serde(rename = "favorCount", default)]
    pub favor_count: Option<i64>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
    #[serde(rename = "viewCount", default)]
    pub view_count: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleHistory {
    #[serde(default, deserialize_with = "de_opt_string_or_number")]
    pub id: Option<String>,
    #[serde(rename = "articleId", default)]
    pub article_id: Option<String>,
    #[serde(default)]
    pub version: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleCount {
    #[serde(default)]
    pub count: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Task {
    #[serde(default, deserialize_with = "de_opt_string_or_number")]
    pub id: Option<String>,
    #[serde(default)]
    pub info: Option<String>,
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub payload: Option<serde_json::Value>,
}

/// Lifecycle states a save task moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl TaskStatus {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Pending),
            1 => Some(Self::Processing),
            2 => Some(Self::Completed),
            3 => Some(Self::Failed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Processing => "PROCESSING",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
        }
    }
}

/// Render an optional raw status code the way replies show it.
pub fn status_label(code: Option<i64>) -> &'static str {
    code.and_then(TaskStatus::from_code)
        .map(|s| s.as_str())
        .unwrap_or("UNKNOWN")
}

#[derive(Debug, Clone, Serialize)]
pub struct SaveTaskRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub payload: SaveTaskPayload,
}

#[derive(Debug, Clone, Serialize)]
pub struct SaveTaskPayload {
    pub target: String,
    #[serde(rename = "targetId")]
    pub target_id: String,
}

impl SaveTaskRequest {
    pub fn save(target: impl Into<String>, target_id: impl Into<String>) -> Self {
        Self {
            kind: "save".into(),
            payload: SaveTaskPayload {
                target: target.into(),
                target_id: target_id.into(),
            },
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskCreated {
    #[serde(rename = "taskId", default, deserialize_with = "de_opt_string_or_number")]
    pub task_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Int(i64),
    Float(f64),
}

fn de_opt_string_or_number<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<StringOrNumber>::deserialize(de)?;
    Ok(raw.map(|v| match v {
        StringOrNumber::String(s) => s,
        StringOrNumber::Int(i) => i.to_string(),
        StringOrNumber::Float(f) => f.to_string(),
    }))
}
