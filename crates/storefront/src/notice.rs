//! User-facing notices, the client's equivalent of toast messages.

use serde::Serialize;

/// Visual weight of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeVariant {
    #[default]
    Default,
    Destructive,
}

/// A short message shown to the user after an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

impl Notice {
    #[must_use]
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NoticeVariant::Default,
        }
    }

    #[must_use]
    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NoticeVariant::Destructive,
        }
    }

    #[must_use]
    pub fn is_destructive(&self) -> bool {
        self.variant == NoticeVariant::Destructive
    }

    /// Record the notice in the log at a level matching its variant.
    pub fn log(&self) {
        match self.variant {
            NoticeVariant::Default => {
                tracing::info!(title = %self.title, description = %self.description, "Notice");
            }
            NoticeVariant::Destructive => {
                tracing::warn!(title = %self.title, description = %self.description, "Notice");
            }
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.description.is_empty() {
            f.write_str(&self.title)
        } else {
            write!(f, "{}: {}", self.title, self.description)
        }
    }
}
