//! Location store seam and its in-memory implementation.
//!
//! The store is the only owner of committed locations. Mutations return
//! nothing: callers observe their effect by reading the next [`Plan`]
//! snapshot, which is replaced wholesale on every accepted change.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::dataset::{DataSet, DataSetLocation};
use crate::location::{Coordinates, Location, LocationId, LocationSnapshot, Plan};
use crate::skill::SkillTag;

/// Operations the editing workflow performs on the application store.
pub trait LocationStore {
    fn create_location(&mut self, coordinate: Coordinates, description: &str, skill: SkillTag);

    fn update_location(&mut self, snapshot: LocationSnapshot);

    fn delete_location(&mut self, id: LocationId);

    /// Remove every location.
    fn clear(&mut self);

    /// Current snapshot.
    fn plan(&self) -> Arc<Plan>;

    /// Bumped on every accepted mutation.
    fn revision(&self) -> u64;
}

/// Process-local store. The first location added to an empty depot slot
/// becomes the depot; the rest are visits in insertion order.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    plan: Arc<Plan>,
    next_id: u64,
    revision: u64,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            plan: Arc::new(Plan::default()),
            next_id: 1,
            revision: 0,
        }
    }

    fn allocate_id(&mut self) -> LocationId {
        let id = LocationId(self.next_id);
        self.next_id += 1;
        id
    }

    fn publish(&mut self, plan: Plan) {
        self.plan = Arc::new(plan);
        self.revision += 1;
        debug!(revision = self.revision, locations = self.plan.len(), "Published plan");
    }

    fn build_location(
        &mut self,
        coordinate: Coordinates,
        description: &str,
        skill: SkillTag,
    ) -> Location {
        Location {
            id: self.allocate_id(),
            description: Some(description.to_string()).filter(|d| !d.trim().is_empty()),
            required_skill: skill,
            lat: coordinate.lat,
            lng: coordinate.lng,
        }
    }

    /// Replace the plan with the contents of a data set.
    pub fn load(&mut self, data_set: &DataSet) {
        let mut plan = Plan::default();
        if let Some(depot) = &data_set.depot {
            plan.depot = Some(self.build_location(
                depot.coordinates(),
                &depot.label,
                depot.required_skill,
            ));
        }
        for visit in &data_set.visits {
            let location =
                self.build_location(visit.coordinates(), &visit.label, visit.required_skill);
            plan.visits.push(location);
        }
        info!(
            name = %data_set.name,
            locations = plan.len(),
            "Loaded data set"
        );
        self.publish(plan);
    }

    /// Snapshot the current plan as a named data set.
    pub fn export(&self, name: &str) -> DataSet {
        DataSet {
            name: name.to_string(),
            exported_at: None,
            depot: self.plan.depot.as_ref().map(DataSetLocation::from),
            visits: self.plan.visits.iter().map(DataSetLocation::from).collect(),
        }
    }
}

impl LocationStore for InMemoryStore {
    fn create_location(&mut self, coordinate: Coordinates, description: &str, skill: SkillTag) {
        let location = self.build_location(coordinate, description, skill);
        let mut plan = Plan::clone(&self.plan);
        if plan.depot.is_none() {
            info!(id = %location.id, "Created depot");
            plan.depot = Some(location);
        } else {
            info!(id = %location.id, "Created visit");
            plan.visits.push(location);
        }
        self.publish(plan);
    }

    fn update_location(&mut self, snapshot: LocationSnapshot) {
        let mut plan = Plan::clone(&self.plan);
        let Some(target) = plan
            .depot
            .iter_mut()
            .chain(plan.visits.iter_mut())
            .find(|location| location.id == snapshot.id)
        else {
            warn!(id = %snapshot.id, "Refusing to update unknown location");
            return;
        };

        target.description = Some(snapshot.description).filter(|d| !d.trim().is_empty());
        target.required_skill = snapshot.required_skill;
        target.lat = snapshot.lat;
        target.lng = snapshot.lng;
        info!(id = %snapshot.id, skill = %snapshot.required_skill, "Updated location");
        self.publish(plan);
    }

    fn delete_location(&mut self, id: LocationId) {
        let mut plan = Plan::clone(&self.plan);
        if plan.is_depot(id) {
            if !plan.visits.is_empty() {
                warn!(%id, visits = plan.visits.len(), "Refusing to delete depot while visits remain");
                return;
            }
            plan.depot = None;
        } else {
            let before = plan.visits.len();
            plan.visits.retain(|visit| visit.id != id);
            if plan.visits.len() == before {
                warn!(%id, "Refusing to delete unknown location");
                return;
            }
        }
        info!(%id, "Deleted location");
        self.publish(plan);
    }

    fn clear(&mut self) {
        info!(locations = self.plan.len(), "Clearing all locations");
        self.publish(Plan::default());
    }

    fn plan(&self) -> Arc<Plan> {
        Arc::clone(&self.plan)
    }

    fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(store: &mut InMemoryStore, lat: f64, description: &str) {
        store.create_location(Coordinates::new(lat, 0.0), description, SkillTag::Vaccination);
    }

    #[test]
    fn first_location_becomes_depot() {
        let mut store = InMemoryStore::new();
        add(&mut store, 1.0, "Depot");
        add(&mut store, 2.0, "");

        let plan = store.plan();
        assert_eq!(plan.depot.as_ref().map(|d| d.id), Some(LocationId(1)));
        assert_eq!(plan.visits.len(), 1);
        assert_eq!(plan.visits[0].id, LocationId(2));
        assert!(plan.visits[0].description.is_none());
        assert_eq!(store.revision(), 2);
    }

    #[test]
    fn published_snapshots_are_not_mutated() {
        let mut store = InMemoryStore::new();
        add(&mut store, 1.0, "Depot");
        let before = store.plan();

        add(&mut store, 2.0, "Visit");

        assert!(before.visits.is_empty());
        assert_eq!(store.plan().visits.len(), 1);
    }

    #[test]
    fn depot_cannot_be_deleted_while_visits_remain() {
        let mut store = InMemoryStore::new();
        add(&mut store, 1.0, "Depot");
        add(&mut store, 2.0, "Visit");
        let revision = store.revision();

        store.delete_location(LocationId(1));

        assert!(store.plan().depot.is_some());
        assert_eq!(store.revision(), revision);

        store.delete_location(LocationId(2));
        store.delete_location(LocationId(1));
        assert!(store.plan().is_empty());
    }

    #[test]
    fn update_replaces_fields_of_matching_location() {
        let mut store = InMemoryStore::new();
        add(&mut store, 1.0, "Depot");
        let snapshot = store.plan().depot.clone().unwrap().snapshot();

        store.update_location(snapshot.with_skill(SkillTag::Depot));

        let plan = store.plan();
        let depot = plan.depot.as_ref().unwrap();
        assert_eq!(depot.required_skill, SkillTag::Depot);
        assert_eq!(depot.description.as_deref(), Some("Depot"));
    }

    #[test]
    fn update_of_unknown_id_leaves_plan_unchanged() {
        let mut store = InMemoryStore::new();
        add(&mut store, 1.0, "Depot");
        let mut snapshot = store.plan().depot.clone().unwrap().snapshot();
        snapshot.id = LocationId(42);

        store.update_location(snapshot);

        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn ids_are_not_reused_after_clear() {
        let mut store = InMemoryStore::new();
        add(&mut store, 1.0, "Depot");
        store.clear();
        add(&mut store, 2.0, "Depot again");

        assert_eq!(store.plan().depot.as_ref().map(|d| d.id), Some(LocationId(2)));
    }
}
