pub mod validation;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::HeaderMap,
};
use chrono::Utc;
use phenix_core::mail::ContactNotification;
use phenix_model::NewContactMessage;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::handlers::client::{client_ip, user_agent};
use crate::infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
};
use validation::{ContactForm, ContactRejection, is_bot};

pub const STORED_MESSAGE: &str =
    "Votre message a été enregistré. Nous vous contacterons bientôt.";
pub const SENT_MESSAGE: &str =
    "Votre message a été envoyé avec succès. Nous vous contacterons bientôt.";
pub const FORBIDDEN_MESSAGE: &str = "Requête non autorisée";
pub const FAILURE_MESSAGE: &str =
    "Une erreur est survenue. Veuillez réessayer plus tard.";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub success: bool,
    pub message: &'static str,
    pub contact_id: i32,
}

pub async fn submit_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ContactForm>, JsonRejection>,
) -> AppResult<Json<ContactResponse>> {
    let agent = user_agent(&headers);
    let ip = client_ip(&headers, state.config.server.trust_proxy_headers);

    if is_bot(agent.as_deref()) {
        warn!(ip = %ip, user_agent = ?agent, "contact submission rejected as bot");
        return Err(AppError::forbidden(FORBIDDEN_MESSAGE));
    }

    let Json(form) = payload.map_err(|_| {
        AppError::bad_request(ContactRejection::MissingFields.message())
    })?;
    let valid = form
        .validate()
        .map_err(|rejection| AppError::bad_request(rejection.message()))?;

    let new_message = NewContactMessage::normalized(
        valid.name,
        valid.email,
        valid.phone,
        valid.subject,
        valid.message,
        ip,
        agent,
    );
    let stored = state
        .db
        .contacts()
        .create(new_message)
        .await
        .map_err(|err| {
            error!(error = %err, "failed to store contact message");
            AppError::internal(FAILURE_MESSAGE)
        })?;
    info!(contact_id = stored.id, "contact message stored");

    let stored_only = Json(ContactResponse {
        success: true,
        message: STORED_MESSAGE,
        contact_id: stored.id,
    });

    let recipient = match state.db.recipients().active_recipient().await {
        Ok(Some(recipient)) => recipient,
        Ok(None) => {
            warn!(contact_id = stored.id, "no active notification recipient configured");
            return Ok(stored_only);
        }
        Err(err) => {
            error!(contact_id = stored.id, error = %err, "failed to load notification recipient");
            return Ok(stored_only);
        }
    };

    let email = ContactNotification::new(&stored, Utc::now())
        .into_email(&recipient.email, &state.config.mail.from);
    match state.mailer.send(email).await {
        Ok(receipt) => {
            info!(contact_id = stored.id, receipt = %receipt.id, "contact notification sent");
            Ok(Json(ContactResponse {
                success: true,
                message: SENT_MESSAGE,
                contact_id: stored.id,
            }))
        }
        Err(err) => {
            error!(contact_id = stored.id, error = %err, "contact notification failed");
            Ok(stored_only)
        }
    }
}
