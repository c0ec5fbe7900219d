use derive_more::Display;
use serde::{Deserialize, Serialize};
use time::{macros::format_description, OffsetDateTime};

/// How many characters of the captured state the label shows.
const LABEL_PREVIEW_LEN: usize = 9;

/// An immutable capture of a [`StateHolder`](crate::StateHolder)'s state at
/// a point in time. Snapshots are created by
/// [`StateHolder::snapshot`](crate::StateHolder::snapshot) and never change
/// afterwards; the captured state is only readable by the holder that
/// restores it. The `kind` tag identifies the family of holder that produced
/// the snapshot and is validated on restore.
#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize, Deserialize)]
#[display(fmt = "{}", "self.label()")]
pub struct Snapshot {
    kind: String,
    state: String,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
}

impl Snapshot {
    pub(crate) fn capture(kind: impl Into<String>, state: impl Into<String>) -> Self {
        let created_at =
            OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        Self {
            kind: kind.into(),
            state: state.into(),
            created_at,
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    pub(crate) fn state(&self) -> &str {
        &self.state
    }

    /// Human-readable summary: creation time plus a truncated preview of the
    /// captured state.
    pub fn label(&self) -> String {
        let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
        let timestamp = self
            .created_at
            .format(&format)
            .unwrap_or_else(|_| self.created_at.to_string());
        let preview: String = self.state.chars().take(LABEL_PREVIEW_LEN).collect();
        format!("{timestamp} / ({preview})...")
    }
}
