use std::collections::BTreeSet;

use crate::{Lead, LeadId};

/// Tri-state indicator derived from a selection and the collection it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    None,
    Some,
    All,
}

/// A set of lead ids. Owners keep it a subset of the ids of the leads it was
/// built against; every mutating operation takes that collection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionSet {
    ids: BTreeSet<LeadId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Adds `id` if absent, removes it if present. Ids not present in `leads`
    /// are ignored. Returns whether the set changed.
    pub fn toggle(&mut self, id: &str, leads: &[Lead]) -> bool {
        if self.ids.remove(id) {
            return true;
        }
        if leads.iter().any(|lead| lead.id == id) {
            self.ids.insert(id.to_owned());
            return true;
        }
        false
    }

    /// `on` selects exactly the ids of `leads`; otherwise clears the set.
    pub fn select_all(&mut self, on: bool, leads: &[Lead]) {
        if on {
            self.ids = leads.iter().map(|lead| lead.id.clone()).collect();
        } else {
            self.ids.clear();
        }
    }

    /// Adds or removes every id of `leads`, leaving other entries alone.
    pub fn set_many(&mut self, on: bool, leads: &[Lead]) {
        for lead in leads {
            if on {
                self.ids.insert(lead.id.clone());
            } else {
                self.ids.remove(&lead.id);
            }
        }
    }

    /// Drops ids that are not present in `leads`. Returns how many were dropped.
    pub fn retain_present(&mut self, leads: &[Lead]) -> usize {
        let before = self.ids.len();
        self.ids.retain(|id| leads.iter().any(|lead| &lead.id == id));
        before - self.ids.len()
    }

    pub fn state(&self, total: usize) -> SelectionState {
        if self.ids.is_empty() {
            SelectionState::None
        } else if self.ids.len() == total {
            SelectionState::All
        } else {
            SelectionState::Some
        }
    }

    /// Selected leads in collection order.
    pub fn selected_leads(&self, leads: &[Lead]) -> Vec<Lead> {
        leads
            .iter()
            .filter(|lead| self.ids.contains(&lead.id))
            .cloned()
            .collect()
    }

    /// Selected ids in collection order.
    pub fn ordered_ids(&self, leads: &[Lead]) -> Vec<LeadId> {
        leads
            .iter()
            .filter(|lead| self.ids.contains(&lead.id))
            .map(|lead| lead.id.clone())
            .collect()
    }
}
