//! Two-step delete: a record is only removed after the user confirms.

use crate::error::BackendError;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ConfirmPhase {
    #[default]
    Closed,
    /// Dialog shown for `id`, waiting for the user.
    Open { id: String },
    /// Delete request in flight; controls are disabled.
    Deleting { id: String },
}

/// State of a delete confirmation dialog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeleteConfirm {
    pub phase: ConfirmPhase,
    pub error: Option<BackendError>,
}

impl DeleteConfirm {
    /// Ask the user to confirm deleting `id`. Ignored while a delete is running.
    pub fn request(&mut self, id: impl Into<String>) {
        if self.is_deleting() {
            return;
        }
        self.phase = ConfirmPhase::Open { id: id.into() };
        self.error = None;
    }

    pub fn cancel(&mut self) {
        if self.is_deleting() {
            return;
        }
        self.phase = ConfirmPhase::Closed;
        self.error = None;
    }

    /// The confirmed id, moving to `Deleting`. `None` unless the dialog is open.
    pub fn begin(&mut self) -> Option<String> {
        let ConfirmPhase::Open { id } = &self.phase else {
            return None;
        };
        let id = id.clone();
        self.phase = ConfirmPhase::Deleting { id: id.clone() };
        self.error = None;
        Some(id)
    }

    /// Close on success; on failure reopen with the error so the user may retry.
    pub fn finish(&mut self, result: Result<(), BackendError>) {
        let ConfirmPhase::Deleting { id } = &self.phase else {
            return;
        };
        let id = id.clone();
        match result {
            Ok(()) => {
                self.phase = ConfirmPhase::Closed;
                self.error = None;
            }
            Err(err) => {
                self.phase = ConfirmPhase::Open { id };
                self.error = Some(err);
            }
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.phase, ConfirmPhase::Closed)
    }

    pub fn is_deleting(&self) -> bool {
        matches!(self.phase, ConfirmPhase::Deleting { .. })
    }

    /// Id the dialog is about, if any.
    pub fn target(&self) -> Option<&str> {
        match &self.phase {
            ConfirmPhase::Closed => None,
            ConfirmPhase::Open { id } | ConfirmPhase::Deleting { id } => Some(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_requires_open_dialog() {
        let mut confirm = DeleteConfirm::default();
        assert_eq!(confirm.begin(), None);

        confirm.request("d1");
        assert_eq!(confirm.begin().as_deref(), Some("d1"));
        assert!(confirm.is_deleting());
        // second click while in flight does nothing
        assert_eq!(confirm.begin(), None);
    }

    #[test]
    fn cancel_closes_without_target() {
        let mut confirm = DeleteConfirm::default();
        confirm.request("d1");
        confirm.cancel();
        assert!(!confirm.is_open());
        assert_eq!(confirm.target(), None);
    }

    #[test]
    fn failure_reopens_for_retry() {
        let mut confirm = DeleteConfirm::default();
        confirm.request("d1");
        confirm.begin();
        confirm.finish(Err(BackendError::unreachable("down")));
        assert_eq!(confirm.phase, ConfirmPhase::Open { id: "d1".into() });
        assert!(confirm.error.is_some());

        assert_eq!(confirm.begin().as_deref(), Some("d1"));
        confirm.finish(Ok(()));
        assert_eq!(confirm.phase, ConfirmPhase::Closed);
        assert!(confirm.error.is_none());
    }
}
