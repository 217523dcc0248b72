//! Sortable action log

use serde::{Deserialize, Serialize};

use super::Action;

/// Which action column orders the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    /// Event timestamp.
    Timestamp,
    /// Plant display name.
    PlantName,
    /// Action type.
    ActionType,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortDirection {
    fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Returns a sorted copy of `actions`. The primary key is `field` in
/// `direction`; ties always break by timestamp ascending, then plant id,
/// so re-sorting a column full of ties is reproducible. Records are never
/// mutated. Never errors: a total order always exists.
pub fn sort_actions(
    actions: &[Action],
    field: SortField,
    direction: SortDirection,
) -> Vec<Action> {
    let mut sorted = actions.to_vec();
    sorted.sort_by(|a, b| {
        let primary = match field {
            SortField::Timestamp => a.timestamp.cmp(&b.timestamp),
            SortField::PlantName => a.plant_name.cmp(&b.plant_name),
            SortField::ActionType => a.action_type.cmp(&b.action_type),
        };
        let primary = match direction {
            SortDirection::Asc => primary,
            SortDirection::Desc => primary.reverse(),
        };
        primary
            .then_with(|| a.timestamp.cmp(&b.timestamp))
            .then_with(|| a.plant_id.cmp(&b.plant_id))
    });
    sorted
}

/// The union of detected actions across all plants, with a user-selectable
/// active ordering. Holds immutable records; sorting is a pure transform.
#[derive(Debug, Clone)]
pub struct ActionLog {
    actions: Vec<Action>,
    sort_field: SortField,
    direction: SortDirection,
}

impl ActionLog {
    /// Creates an empty log, ordered newest-first by default.
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
            sort_field: SortField::Timestamp,
            direction: SortDirection::Desc,
        }
    }

    /// Appends one action.
    pub fn push(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// Appends a batch of detector output.
    pub fn extend(&mut self, actions: impl IntoIterator<Item = Action>) {
        self.actions.extend(actions);
    }

    /// Number of retained actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// The active sort key and direction.
    pub fn active_sort(&self) -> (SortField, SortDirection) {
        (self.sort_field, self.direction)
    }

    /// Selects the active sort the way a column header click does: the
    /// already-active field flips direction, a new field takes over with
    /// direction reset to descending. Returns the resulting sort.
    pub fn toggle_sort(&mut self, field: SortField) -> (SortField, SortDirection) {
        if self.sort_field == field {
            self.direction = self.direction.flipped();
        } else {
            self.sort_field = field;
            self.direction = SortDirection::Desc;
        }
        self.active_sort()
    }

    /// The log under the active ordering.
    pub fn view(&self) -> Vec<Action> {
        sort_actions(&self.actions, self.sort_field, self.direction)
    }

    /// The log under an explicit ordering, without touching the active one.
    pub fn sorted_by(&self, field: SortField, direction: SortDirection) -> Vec<Action> {
        sort_actions(&self.actions, field, direction)
    }
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::new()
    }
}
