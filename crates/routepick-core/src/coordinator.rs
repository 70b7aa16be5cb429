//! The editing coordinator.
//!
//! Owns the transient UI state of the location workflow (the open dialog and
//! its pending selection, the highlighted row, the last validation problem)
//! and turns user gestures into store operations. Every handler runs to
//! completion against the current snapshot; results of store calls are
//! observed by re-reading the plan, never through return values.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::{AppConfig, ConfirmPolicy};
use crate::dataset::{DataSet, DemoCatalog};
use crate::dialog::{ConfirmedSelection, PendingSelection, SelectionDialog};
use crate::error::ValidationError;
use crate::event::{InteractionEvent, MapClick, SearchResult};
use crate::location::{LocationId, LocationSnapshot, Plan};
use crate::skill::{SkillCatalog, SkillTag};
use crate::store::{InMemoryStore, LocationStore};
use crate::view::{LocationCollection, RowMessage};

/// Inputs for the map surface.
#[derive(Debug, Clone)]
pub struct MapProps {
    pub selected_id: Option<LocationId>,
    pub plan: Arc<Plan>,
}

/// Result of confirming the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// A location was sent to the store.
    Committed,
    /// Confirmation refused; see [`EditingCoordinator::validation_error`].
    Rejected(ValidationError),
    /// The dialog was not open.
    Ignored,
}

pub struct EditingCoordinator<S: LocationStore> {
    store: S,
    catalog: SkillCatalog,
    dialog: SelectionDialog,
    collection: LocationCollection,
    selected_id: Option<LocationId>,
    confirm_policy: ConfirmPolicy,
    validation: Option<ValidationError>,
    seen_revision: Option<u64>,
}

impl<S: LocationStore> EditingCoordinator<S> {
    pub fn new(store: S, config: &AppConfig) -> Self {
        let mut coordinator = Self {
            store,
            catalog: config.catalog(),
            dialog: SelectionDialog::new(),
            collection: LocationCollection::new(config.label_width),
            selected_id: None,
            confirm_policy: config.confirm_policy,
            validation: None,
            seen_revision: None,
        };
        coordinator.refresh();
        coordinator
    }

    pub fn with_defaults(store: S) -> Self {
        Self::new(store, &AppConfig::default())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn catalog(&self) -> &SkillCatalog {
        &self.catalog
    }

    pub fn dialog(&self) -> &SelectionDialog {
        &self.dialog
    }

    pub fn collection(&self) -> &LocationCollection {
        &self.collection
    }

    pub fn selected_id(&self) -> Option<LocationId> {
        self.selected_id
    }

    pub fn validation_error(&self) -> Option<ValidationError> {
        self.validation
    }

    pub fn plan(&self) -> Arc<Plan> {
        self.store.plan()
    }

    pub fn map_props(&self) -> MapProps {
        MapProps {
            selected_id: self.selected_id,
            plan: self.store.plan(),
        }
    }

    /// Re-sync the list with the store if it published a new plan.
    pub fn refresh(&mut self) {
        let revision = self.store.revision();
        if self.seen_revision == Some(revision) {
            return;
        }
        let plan = self.store.plan();
        self.collection.sync(&plan);
        self.seen_revision = Some(revision);

        if let Some(id) = self.selected_id
            && plan.find(id).is_none()
        {
            debug!(%id, "Highlighted location is gone, clearing selection");
            self.selected_id = None;
        }
    }

    fn open_dialog(&mut self, pending: PendingSelection) {
        self.validation = None;
        self.dialog.open(pending);
    }

    pub fn handle_interaction(&mut self, event: InteractionEvent) {
        match event {
            InteractionEvent::Map(click) => self.handle_map_interaction(click),
            InteractionEvent::Search(result) => self.handle_search_result(result),
        }
    }

    pub fn handle_map_interaction(&mut self, click: MapClick) {
        debug!(coordinate = %click.coordinate, "Map clicked");
        self.open_dialog(click.into());
    }

    pub fn handle_search_result(&mut self, result: SearchResult) {
        debug!(address = %result.address, "Search result picked");
        self.open_dialog(result.into());
    }

    /// Pick a skill in the open dialog.
    pub fn choose_skill(&mut self, skill: SkillTag) -> bool {
        let chosen = self.dialog.choose_skill(&self.catalog, skill);
        if chosen {
            self.validation = None;
        }
        chosen
    }

    /// Confirm the dialog and commit its selection.
    pub fn handle_dialog_confirm(&mut self) -> ConfirmOutcome {
        match self.dialog.confirm() {
            Ok(payload) => self.commit(payload),
            Err(err) => {
                debug!(%err, "Ignoring confirm");
                ConfirmOutcome::Ignored
            }
        }
    }

    fn commit(&mut self, payload: ConfirmedSelection) -> ConfirmOutcome {
        let Some(skill) = payload.skill else {
            let error = ValidationError::SkillRequired;
            self.validation = Some(error);
            match self.confirm_policy {
                ConfirmPolicy::Reprompt => {
                    warn!("Confirmed without a skill, asking again");
                    self.dialog.open(PendingSelection {
                        coordinate: payload.coordinate,
                        address: payload.address,
                    });
                }
                ConfirmPolicy::Discard => {
                    warn!("Confirmed without a skill, discarding selection");
                }
            }
            return ConfirmOutcome::Rejected(error);
        };

        self.validation = None;
        let description = payload.address.unwrap_or_default();
        info!(coordinate = %payload.coordinate, %skill, "Committing new location");
        self.store
            .create_location(payload.coordinate, &description, skill);
        self.refresh();
        ConfirmOutcome::Committed
    }

    pub fn handle_dialog_cancel(&mut self) {
        self.validation = None;
        if let Some(discarded) = self.dialog.cancel() {
            debug!(coordinate = %discarded.coordinate, "Discarded pending selection");
        }
    }

    pub fn handle_row_skill_change(&mut self, snapshot: LocationSnapshot, skill: SkillTag) {
        if !self.catalog.is_selectable(skill) {
            warn!(%skill, id = %snapshot.id, "Refusing unselectable skill");
            return;
        }
        let updated = snapshot.with_skill(skill);
        info!(id = %updated.id, %skill, "Updating location skill");
        self.store.update_location(updated);
        self.refresh();
    }

    pub fn handle_row_select(&mut self, id: Option<LocationId>) {
        self.selected_id = id;
    }

    pub fn handle_row_remove(&mut self, id: LocationId) {
        info!(%id, "Removing location");
        self.store.delete_location(id);
        self.refresh();
    }

    pub fn handle_row_message(&mut self, message: RowMessage) {
        match message {
            RowMessage::Remove(id) => self.handle_row_remove(id),
            RowMessage::Select(id) => self.handle_row_select(id),
            RowMessage::SkillChange(snapshot, skill) => {
                self.handle_row_skill_change(snapshot, skill)
            }
        }
    }

    // Row gestures, routed through the row so its latch and snapshot apply.

    pub fn hover_row(&mut self, id: LocationId) {
        if let Some(message) = self.collection.hover(id) {
            self.handle_row_message(message);
        }
    }

    pub fn leave_row(&mut self, id: LocationId) {
        if let Some(message) = self.collection.leave(id) {
            self.handle_row_message(message);
        }
    }

    pub fn change_row_skill(&mut self, id: LocationId, skill: SkillTag) {
        if let Some(message) = self.collection.change_skill(id, skill) {
            self.handle_row_message(message);
        }
    }

    pub fn click_remove(&mut self, id: LocationId) {
        match self.collection.click_remove(id) {
            Some(message) => self.handle_row_message(message),
            None => debug!(%id, "Removal click swallowed"),
        }
    }

    pub fn clear(&mut self) {
        self.dialog.cancel();
        self.validation = None;
        self.selected_id = None;
        self.store.clear();
        self.refresh();
    }
}

impl EditingCoordinator<InMemoryStore> {
    pub fn load_data_set(&mut self, data_set: &DataSet) {
        self.dialog.cancel();
        self.selected_id = None;
        self.store.load(data_set);
        self.refresh();
    }

    pub fn load_demo(&mut self, name: &str) -> crate::Result<()> {
        let data_set = DemoCatalog.get(name)?;
        self.load_data_set(&data_set);
        Ok(())
    }

    pub fn export(&self, name: &str) -> DataSet {
        self.store.export(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Coordinates;

    fn coordinator() -> EditingCoordinator<InMemoryStore> {
        EditingCoordinator::with_defaults(InMemoryStore::new())
    }

    fn click(lat: f64, lng: f64) -> MapClick {
        MapClick {
            coordinate: Coordinates::new(lat, lng),
        }
    }

    #[test]
    fn confirmed_map_click_becomes_depot_row() {
        let mut c = coordinator();
        c.handle_map_interaction(click(1.0, 2.0));
        c.choose_skill(SkillTag::Depot);

        assert_eq!(c.handle_dialog_confirm(), ConfirmOutcome::Committed);

        let depot = c.collection().depot().unwrap();
        assert_eq!(depot.label().text, "Location 1");
        assert!(!c.dialog().is_open());
    }

    #[test]
    fn reprompt_policy_keeps_dialog_open() {
        let mut c = coordinator();
        c.handle_map_interaction(click(1.0, 2.0));

        let outcome = c.handle_dialog_confirm();

        assert_eq!(outcome, ConfirmOutcome::Rejected(ValidationError::SkillRequired));
        assert!(c.dialog().is_open());
        assert_eq!(c.validation_error(), Some(ValidationError::SkillRequired));
        assert!(c.plan().is_empty());

        c.choose_skill(SkillTag::Vaccination);
        assert!(c.validation_error().is_none());
        assert_eq!(c.handle_dialog_confirm(), ConfirmOutcome::Committed);
    }

    #[test]
    fn discard_policy_drops_selection() {
        let config = AppConfig {
            confirm_policy: ConfirmPolicy::Discard,
            ..AppConfig::default()
        };
        let mut c = EditingCoordinator::new(InMemoryStore::new(), &config);
        c.handle_map_interaction(click(1.0, 2.0));

        c.handle_dialog_confirm();

        assert!(!c.dialog().is_open());
        assert_eq!(c.validation_error(), Some(ValidationError::SkillRequired));
        assert!(c.plan().is_empty());
    }

    #[test]
    fn confirm_without_open_dialog_is_ignored() {
        let mut c = coordinator();
        assert_eq!(c.handle_dialog_confirm(), ConfirmOutcome::Ignored);
    }

    #[test]
    fn selection_clears_when_highlighted_row_is_removed() {
        let mut c = coordinator();
        c.handle_map_interaction(click(1.0, 2.0));
        c.choose_skill(SkillTag::Depot);
        c.handle_dialog_confirm();

        c.hover_row(LocationId(1));
        assert_eq!(c.selected_id(), Some(LocationId(1)));

        c.click_remove(LocationId(1));
        assert!(c.selected_id().is_none());
        assert!(c.collection().is_empty());
    }

    #[test]
    fn load_demo_replaces_plan() {
        let mut c = coordinator();
        c.load_demo("sample").unwrap();

        assert!(c.collection().depot().is_some());
        assert!(c.collection().len() > 1);
        assert!(c.load_demo("atlantis").is_err());
    }
}
