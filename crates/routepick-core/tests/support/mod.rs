//! Test doubles shared by the integration tests.

use std::sync::Arc;

use routepick_core::location::{Coordinates, LocationId, LocationSnapshot, Plan};
use routepick_core::skill::SkillTag;
use routepick_core::store::{InMemoryStore, LocationStore};

#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    Create {
        coordinate: Coordinates,
        description: String,
        skill: SkillTag,
    },
    Update(LocationSnapshot),
    Delete(LocationId),
    Clear,
}

/// Records every call and forwards it to an in-memory store.
#[derive(Debug, Default)]
pub struct RecordingStore {
    pub calls: Vec<StoreCall>,
    inner: InMemoryStore,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocationStore for RecordingStore {
    fn create_location(&mut self, coordinate: Coordinates, description: &str, skill: SkillTag) {
        self.calls.push(StoreCall::Create {
            coordinate,
            description: description.to_string(),
            skill,
        });
        self.inner.create_location(coordinate, description, skill);
    }

    fn update_location(&mut self, snapshot: LocationSnapshot) {
        self.calls.push(StoreCall::Update(snapshot.clone()));
        self.inner.update_location(snapshot);
    }

    fn delete_location(&mut self, id: LocationId) {
        self.calls.push(StoreCall::Delete(id));
        self.inner.delete_location(id);
    }

    fn clear(&mut self) {
        self.calls.push(StoreCall::Clear);
        self.inner.clear();
    }

    fn plan(&self) -> Arc<Plan> {
        self.inner.plan()
    }

    fn revision(&self) -> u64 {
        self.inner.revision()
    }
}
