use serde::Deserialize;

use crate::domain::{Board, ColumnId, HubError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragLocation {
    pub column_id: ColumnId,
    pub index: usize,
}

/// The result of dropping a card. `destination` is `None` when the card was
/// released outside every column.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragEnd {
    pub issue_id: String,
    pub source: DragLocation,
    #[serde(default)]
    pub destination: Option<DragLocation>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderOutcome {
    pub board: Board,
    /// Set when the card landed in a different column.
    pub moved_to: Option<ColumnId>,
}

impl ReorderOutcome {
    pub fn unchanged(board: &Board) -> Self {
        Self {
            board: board.clone(),
            moved_to: None,
        }
    }

    pub fn is_noop(&self, original: &Board) -> bool {
        &self.board == original
    }

    pub fn notice(&self) -> Option<String> {
        self.moved_to
            .map(|column| format!("Issue moved to {}", column.title()))
    }
}

pub struct ReorderEngine;

impl ReorderEngine {
    /// Computes the board after a drag. The input board is never modified.
    pub fn on_drag_end(board: &Board, drag: &DragEnd) -> Result<ReorderOutcome, HubError> {
        let Some(destination) = drag.destination else {
            return Ok(ReorderOutcome::unchanged(board));
        };

        if destination == drag.source {
            return Ok(ReorderOutcome::unchanged(board));
        }

        let source_ids = &board.column(drag.source.column_id).issue_ids;
        if source_ids.get(drag.source.index) != Some(&drag.issue_id) {
            return Err(HubError::BadRequest(format!(
                "Issue {} is not at position {} of {}",
                drag.issue_id, drag.source.index, drag.source.column_id
            )));
        }

        let mut next = board.clone();

        next.column_mut(drag.source.column_id)
            .issue_ids
            .remove(drag.source.index);

        let dest_ids = &mut next.column_mut(destination.column_id).issue_ids;
        let at = destination.index.min(dest_ids.len());
        dest_ids.insert(at, drag.issue_id.clone());

        let moved_to =
            (destination.column_id != drag.source.column_id).then_some(destination.column_id);

        Ok(ReorderOutcome {
            board: next,
            moved_to,
        })
    }
}
