//! Per-user session state.

use crate::domain::{HistoryStore, PredictionRecord};

/// State owned by one interactive session: the prediction history and the
/// "current" prediction shown under the form.
///
/// Created empty at session start and dropped with it; nothing is persisted.
///
/// The current pointer moves `Unset -> Set` on the first recorded
/// prediction, is overwritten by each later one, and returns to `Unset` only
/// on [`Session::clear`].
#[derive(Debug, Clone)]
pub struct Session {
    history: HistoryStore,
    current: Option<PredictionRecord>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self {
            history: HistoryStore::new(),
            current: None,
        }
    }

    /// Append `record` to the history and make it current.
    pub fn record(&mut self, record: PredictionRecord) {
        self.history.append(record.clone());
        self.current = Some(record);
    }

    /// Empty the history and unset the current prediction.
    pub fn clear(&mut self) {
        self.history.clear();
        self.current = None;
    }

    #[must_use]
    pub fn current(&self) -> Option<&PredictionRecord> {
        self.current.as_ref()
    }

    /// The last `n` records, newest first.
    #[must_use]
    pub fn recent(&self, n: usize) -> Vec<&PredictionRecord> {
        self.history.recent(n)
    }

    #[must_use]
    pub fn history(&self) -> &HistoryStore {
        &self.history
    }
}
