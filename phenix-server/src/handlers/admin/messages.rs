use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use phenix_model::ContactMessage;
use serde::Serialize;

use crate::infra::{app_state::AppState, errors::AppResult};

/// What the admin panel shows for a submission.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageSummary {
    pub nom: String,
    pub email: String,
    pub telephone: Option<String>,
    pub sujet: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl From<ContactMessage> for MessageSummary {
    fn from(message: ContactMessage) -> Self {
        Self {
            nom: message.name,
            email: message.email,
            telephone: message.phone,
            sujet: message.subject,
            message: message.message,
            created_at: message.created_at,
        }
    }
}

pub async fn list_messages(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<MessageSummary>>> {
    let messages = state.db.contacts().list_newest_first().await?;
    Ok(Json(messages.into_iter().map(MessageSummary::from).collect()))
}
