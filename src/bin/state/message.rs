use crate::database::error::RepositoryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Warning,
    Error,
}

/// Shown to the user in a dialog, one at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserMessage {
    pub kind: MessageKind,
    pub title: String,
    pub text: String,
}

impl UserMessage {
    pub fn info(title: &str, text: &str) -> Self {
        Self::with_kind(MessageKind::Info, title, text)
    }

    pub fn warning(title: &str, text: &str) -> Self {
        Self::with_kind(MessageKind::Warning, title, text)
    }

    pub fn error(title: &str, text: &str) -> Self {
        Self::with_kind(MessageKind::Error, title, text)
    }

    fn with_kind(kind: MessageKind, title: &str, text: &str) -> Self {
        Self {
            kind,
            title: title.to_owned(),
            text: text.to_owned(),
        }
    }
}

impl From<&RepositoryError> for UserMessage {
    fn from(error: &RepositoryError) -> Self {
        let text = error.to_string();

        match error {
            RepositoryError::Validation(_) => UserMessage::warning("Validation", &text),
            _ if error.is_connection() => UserMessage::error("Connection", &text),
            _ => UserMessage::error("Error", &text),
        }
    }
}
