//! Create-vs-update intent for the save operation.

use crate::types::SetKey;

/// What a save should do with the submitted form.
///
/// The presentation layer builds one of these when the form opens and hands
/// it to the save call, so the key being edited never lives in shared state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditSession {
    /// Insert a new record.
    #[default]
    Create,
    /// Replace the record currently stored under `old_key`. The submitted
    /// identifier may differ (rename).
    Update { old_key: SetKey },
}

impl EditSession {
    pub fn update(old_key: impl Into<SetKey>) -> Self {
        EditSession::Update {
            old_key: old_key.into(),
        }
    }
}
