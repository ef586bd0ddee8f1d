//! Common test utilities and fixture helpers.
//!
//! Fixture documents live in `docs/fixtures` at the workspace root and are
//! shared with the CLI tests.

use std::path::PathBuf;

use evroute_lib::{ChargerSet, RoadNetwork, SearchConfig};

/// Path to fixtures directory used by tests.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Four nodes `1 - 2 - 3 - 4` in a line, every hop costing 3 kWh.
#[allow(dead_code)]
pub fn line_network() -> RoadNetwork {
    RoadNetwork::from_json_path(&fixtures_dir().join("line_network.json"))
        .expect("load fixture line_network.json")
}

/// Single charger at node 2 of [`line_network`].
#[allow(dead_code)]
pub fn line_chargers() -> ChargerSet {
    ChargerSet::from_json_path(&fixtures_dir().join("line_chargers.json"))
        .expect("load fixture line_chargers.json")
}

/// 3x3 grid, 1 km spacing, edge costs derived from length.
#[allow(dead_code)]
pub fn town_network() -> RoadNetwork {
    RoadNetwork::from_json_path(&fixtures_dir().join("town_network.json"))
        .expect("load fixture town_network.json")
}

#[allow(dead_code)]
pub fn town_chargers() -> ChargerSet {
    ChargerSet::from_json_path(&fixtures_dir().join("town_chargers.json"))
        .expect("load fixture town_chargers.json")
}

/// Unit battery step and the given capacity, starting full.
#[allow(dead_code)]
pub fn full_battery(capacity: f64, recharge: f64) -> SearchConfig {
    SearchConfig {
        max_capacity: capacity,
        initial_charge: capacity,
        recharge_amount: recharge,
        step: 1.0,
        ..SearchConfig::default()
    }
}
