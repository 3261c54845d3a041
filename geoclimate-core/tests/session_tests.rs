//! Session persistence tests

use chrono::NaiveDate;
use geoclimate_core::optimizer::generate_alternatives;
use geoclimate_core::scenario::{stress, StressMultipliers};
use geoclimate_core::session::{self, SessionFile, SESSION_SCHEMA_VERSION};
use geoclimate_core::{assess, ContextStore, RouteContext, TransportMode, WeightingProfile};
use tempfile::TempDir;

fn full_store() -> ContextStore {
    let route = RouteContext {
        origin: "Russia".to_string(),
        destination: "Netherlands".to_string(),
        mode: TransportMode::Rail,
        departure_date: NaiveDate::from_ymd_opt(2024, 9, 30).unwrap(),
        weighting: WeightingProfile::GeoHeavy,
        include_conflict: true,
    };
    let assessment = assess(&route);
    let mut store = ContextStore::new();
    store.set_lane(route.clone(), assessment);
    store.set_scenario(stress(&assessment, StressMultipliers::default()));
    store.set_options(generate_alternatives(&route));
    store.push_basket(route, assessment);
    store
}

#[test]
fn test_full_store_survives_save_and_load() {
    let temp = TempDir::new().expect("failed to create temp directory");
    let path = temp.path().join(".geoclimate").join("session.json");
    let store = full_store();

    session::save(&path, &store).expect("save should succeed");
    let loaded = session::load_or_new(&path).expect("load should succeed");
    assert_eq!(loaded, store);
    assert_eq!(loaded.options().map(|o| o.len()), Some(2));
    assert_eq!(loaded.current_lane().unwrap().1.conflict_bump, 10);
}

#[test]
fn test_saved_file_shape() {
    let temp = TempDir::new().expect("failed to create temp directory");
    let path = temp.path().join("session.json");
    session::save(&path, &full_store()).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["schema_version"], SESSION_SCHEMA_VERSION);
    assert!(value["saved_at"].is_string());
    assert_eq!(value["store"]["route"]["mode"], "rail");
    assert_eq!(value["store"]["route"]["weighting"], "Geo-heavy");
    assert_eq!(value["store"]["options"][0]["label"], "Mode shift");
    assert_eq!(value["store"]["basket"].as_array().map(|b| b.len()), Some(1));
}

#[test]
fn test_corrupt_session_is_an_error() {
    let temp = TempDir::new().expect("failed to create temp directory");
    let path = temp.path().join("session.json");
    std::fs::write(&path, "{\"schema_version\": 1, \"store\": ").unwrap();

    let err = format!("{:#}", session::load_or_new(&path).unwrap_err());
    assert!(err.contains("invalid session file"));
}

#[test]
fn test_future_schema_is_rejected() {
    let temp = TempDir::new().expect("failed to create temp directory");
    let path = temp.path().join("session.json");
    let mut file = SessionFile::new(ContextStore::new());
    file.schema_version = SESSION_SCHEMA_VERSION + 1;
    std::fs::write(&path, file.to_json().unwrap()).unwrap();

    let err = format!("{:#}", session::load_or_new(&path).unwrap_err());
    assert!(err.contains("schema version mismatch"));
}
