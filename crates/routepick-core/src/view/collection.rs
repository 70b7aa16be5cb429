//! The ordered list of committed locations.
//!
//! Rows are reconciled by location id on every [`LocationCollection::sync`]:
//! a row that survives keeps its removal latch, a row whose id leaves the
//! plan is dropped together with it.

use tracing::debug;

use super::entry::{DEFAULT_LABEL_WIDTH, LocationEntry};
use super::RowMessage;
use crate::location::{Location, LocationId, Plan};
use crate::skill::SkillTag;

/// What the list shows.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionView<'a> {
    /// No depot and no visits: a single placeholder.
    Empty,
    /// Depot first, then visits ascending by id.
    Rows(Vec<&'a LocationEntry>),
}

#[derive(Debug, Clone)]
pub struct LocationCollection {
    depot: Option<LocationEntry>,
    visits: Vec<LocationEntry>,
    label_width: usize,
}

impl Default for LocationCollection {
    fn default() -> Self {
        Self::new(DEFAULT_LABEL_WIDTH)
    }
}

impl LocationCollection {
    pub const EMPTY_TEXT: &'static str = "No locations";

    pub fn new(label_width: usize) -> Self {
        Self {
            depot: None,
            visits: Vec::new(),
            label_width,
        }
    }

    /// Build rows for a plan with no prior row state.
    pub fn from_plan(plan: &Plan, label_width: usize) -> Self {
        let mut collection = Self::new(label_width);
        collection.sync(plan);
        collection
    }

    /// Reconcile rows with a new plan snapshot. The plan is not modified.
    pub fn sync(&mut self, plan: &Plan) {
        let mut previous: Vec<LocationEntry> = self.depot.take().into_iter().collect();
        previous.append(&mut self.visits);

        let width = self.label_width;
        let has_visits = !plan.visits.is_empty();
        self.depot = plan
            .depot
            .as_ref()
            .map(|depot| Self::row_for(&mut previous, depot, has_visits, width));

        let mut sorted: Vec<&Location> = plan.visits.iter().collect();
        sorted.sort_by_key(|visit| visit.id);
        self.visits = sorted
            .into_iter()
            .map(|visit| Self::row_for(&mut previous, visit, false, width))
            .collect();

        if !previous.is_empty() {
            let dropped: Vec<_> = previous.iter().map(LocationEntry::id).collect();
            debug!(?dropped, "Dropped rows no longer in plan");
        }
    }

    fn row_for(
        previous: &mut Vec<LocationEntry>,
        location: &Location,
        remove_disabled: bool,
        label_width: usize,
    ) -> LocationEntry {
        match previous.iter().position(|row| row.id() == location.id) {
            Some(index) => previous
                .swap_remove(index)
                .refreshed(location.clone(), remove_disabled),
            None => LocationEntry::with_label_width(location.clone(), remove_disabled, label_width),
        }
    }

    pub fn view(&self) -> CollectionView<'_> {
        if self.is_empty() {
            CollectionView::Empty
        } else {
            CollectionView::Rows(self.rows().collect())
        }
    }

    pub fn is_empty(&self) -> bool {
        self.depot.is_none() && self.visits.is_empty()
    }

    pub fn depot(&self) -> Option<&LocationEntry> {
        self.depot.as_ref()
    }

    pub fn rows(&self) -> impl Iterator<Item = &LocationEntry> {
        self.depot.iter().chain(self.visits.iter())
    }

    pub fn len(&self) -> usize {
        usize::from(self.depot.is_some()) + self.visits.len()
    }

    pub fn row(&self, id: LocationId) -> Option<&LocationEntry> {
        self.rows().find(|row| row.id() == id)
    }

    fn row_mut(&mut self, id: LocationId) -> Option<&mut LocationEntry> {
        self.depot
            .iter_mut()
            .chain(self.visits.iter_mut())
            .find(|row| row.id() == id)
    }

    /// Row at a display position, depot included.
    pub fn row_at(&self, index: usize) -> Option<&LocationEntry> {
        self.rows().nth(index)
    }

    pub fn hover(&self, id: LocationId) -> Option<RowMessage> {
        self.row(id).map(LocationEntry::hover)
    }

    pub fn leave(&self, id: LocationId) -> Option<RowMessage> {
        self.row(id).map(LocationEntry::leave)
    }

    pub fn change_skill(&self, id: LocationId, skill: SkillTag) -> Option<RowMessage> {
        self.row(id).map(|row| row.change_skill(skill))
    }

    pub fn click_remove(&mut self, id: LocationId) -> Option<RowMessage> {
        self.row_mut(id).and_then(LocationEntry::click_remove)
    }
}
