use thiserror::Error;

/// Delivery failures, with provider messages mapped onto the cases the site
/// reports distinctly.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MailError {
    #[error(
        "Adresse email introuvable. Vérifiez que l'adresse email du destinataire est correcte."
    )]
    RecipientNotFound,

    #[error(
        "Boîte mail indisponible. Le destinataire ne peut pas recevoir d'emails."
    )]
    MailboxUnavailable,

    #[error("Email rejeté par le serveur de destination.")]
    Rejected,

    #[error("Erreur d'authentification SMTP. Vérifiez vos identifiants.")]
    Authentication,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("{0}")]
    Other(String),
}

impl MailError {
    /// Maps a raw provider message, checking the cases in order.
    pub fn classify(message: &str) -> Self {
        let lowered = message.to_lowercase();
        let mentions = |needles: &[&str]| {
            needles.iter().any(|needle| lowered.contains(needle))
        };

        if mentions(&["550", "does not exist"]) {
            MailError::RecipientNotFound
        } else if mentions(&["553", "mailbox unavailable"]) {
            MailError::MailboxUnavailable
        } else if mentions(&["554", "rejected"]) {
            MailError::Rejected
        } else if mentions(&["authentication", "login"]) {
            MailError::Authentication
        } else {
            MailError::Other(message.to_string())
        }
    }
}

impl From<reqwest::Error> for MailError {
    fn from(err: reqwest::Error) -> Self {
        MailError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_provider_messages() {
        assert_eq!(
            MailError::classify("550 5.1.1 User does not exist"),
            MailError::RecipientNotFound
        );
        assert_eq!(
            MailError::classify("Mailbox Unavailable"),
            MailError::MailboxUnavailable
        );
        assert_eq!(MailError::classify("554 message rejected"), MailError::Rejected);
        assert_eq!(
            MailError::classify("Invalid login: 535"),
            MailError::Authentication
        );
        assert_eq!(
            MailError::classify("connection reset"),
            MailError::Other("connection reset".into())
        );
    }

    #[test]
    fn earlier_cases_win() {
        // "rejected" also appears, but the 550 code is checked first.
        assert_eq!(
            MailError::classify("550 recipient rejected"),
            MailError::RecipientNotFound
        );
    }
}
