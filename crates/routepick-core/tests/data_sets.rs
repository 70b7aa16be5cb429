use routepick_core::prelude::*;

#[test]
fn loading_a_demo_assigns_fresh_ids_depot_first() {
    let mut store = InMemoryStore::new();
    let data_set = DemoCatalog.get("sample").unwrap();

    store.load(&data_set);

    let plan = store.plan();
    let depot = plan.depot.as_ref().unwrap();
    assert_eq!(depot.id, LocationId(1));
    assert_eq!(depot.required_skill, SkillTag::Depot);
    let visit_ids: Vec<u64> = plan.visits.iter().map(|v| v.id.0).collect();
    assert_eq!(visit_ids, (2..2 + data_set.visits.len() as u64).collect::<Vec<_>>());
}

#[test]
fn export_reflects_edits() {
    let mut coordinator = EditingCoordinator::with_defaults(InMemoryStore::new());
    coordinator.load_demo("clinics").unwrap();
    coordinator.change_row_skill(LocationId(2), SkillTag::Testkit);

    let exported = coordinator.export("edited");

    assert_eq!(exported.name, "edited");
    assert_eq!(exported.visits[0].required_skill, SkillTag::Testkit);
    assert_eq!(exported.depot.as_ref().unwrap().label, "Regional Blood Bank");
}

#[test]
fn exported_toml_loads_back_into_same_plan() {
    let mut store = InMemoryStore::new();
    store.load(&DemoCatalog.get("clinics").unwrap());
    let exported = store.export("clinics").stamped();

    let content = exported.to_toml_string().unwrap();
    let reloaded = DataSet::from_toml_str(&content).unwrap();

    assert!(reloaded.exported_at.is_some());
    assert_eq!(reloaded.depot, exported.depot);
    assert_eq!(reloaded.visits, exported.visits);
}

#[test]
fn json_data_set_without_label_defaults_to_empty_description() {
    let content = r#"{
        "name": "json",
        "visits": [{"lat": 1.0, "lng": 2.0, "requiredSkill": "testkit"}]
    }"#;
    let data_set = DataSet::from_json_str(content).unwrap();
    let mut store = InMemoryStore::new();

    store.load(&data_set);

    let plan = store.plan();
    assert!(plan.depot.is_none());
    assert!(plan.visits[0].description.is_none());
}
