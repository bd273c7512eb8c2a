//! Line-item reconciliation between the saved and the edited treatment.
//!
//! The backend stores drugs, procedures and tests as separate rows, so an
//! edit is submitted as per-line adds, deletes and updates.

use serde::{Deserialize, Serialize};

use crate::models::{LineKind, Treatment, TreatmentLine};

/// A line whose quantity or price changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineChange {
    pub before: TreatmentLine,
    pub after: TreatmentLine,
}

/// Per-line differences, matched by item code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineChanges {
    pub added: Vec<TreatmentLine>,
    pub removed: Vec<TreatmentLine>,
    pub changed: Vec<LineChange>,
}

impl LineChanges {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }
}

/// Diff two line lists.
///
/// Lines are matched by code, each saved line at most once, so a code that
/// appears twice in `edited` but once in `saved` yields one match and one
/// addition. Order of `added` follows `edited`; order of `removed` follows
/// `saved`.
pub fn reconcile_lines(saved: &[TreatmentLine], edited: &[TreatmentLine]) -> LineChanges {
    let mut matched = vec![false; saved.len()];
    let mut changes = LineChanges::default();

    for line in edited {
        let found = saved
            .iter()
            .enumerate()
            .position(|(i, s)| !matched[i] && s.code == line.code);

        match found {
            Some(i) => {
                matched[i] = true;
                let before = &saved[i];
                if before.quantity != line.quantity || before.unit_price != line.unit_price {
                    changes.changed.push(LineChange {
                        before: before.clone(),
                        after: line.clone(),
                    });
                }
            }
            None => changes.added.push(line.clone()),
        }
    }

    changes.removed = saved
        .iter()
        .zip(&matched)
        .filter(|(_, used)| !**used)
        .map(|(line, _)| line.clone())
        .collect();

    changes
}

/// Diff one kind of line between two versions of a treatment.
pub fn reconcile_treatment(saved: &Treatment, edited: &Treatment, kind: LineKind) -> LineChanges {
    let changes = reconcile_lines(&saved.lines(kind), &edited.lines(kind));
    if !changes.is_empty() {
        tracing::debug!(
            ?kind,
            added = changes.added.len(),
            removed = changes.removed.len(),
            changed = changes.changed.len(),
            "reconciled treatment lines"
        );
    }
    changes
}
