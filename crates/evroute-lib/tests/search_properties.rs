//! Properties checked over seeded random networks.
//!
//! Every network is a jittered grid with random explicit costs, so the
//! consumption-rate heuristic stays admissible as long as `min_rate` does not
//! exceed the cheapest cost per km.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use evroute_lib::search::{SearchOutcome, SearchPolicy};
use evroute_lib::{
    reconstruct, ChargerSet, Edge, ExpansionRecorder, Heuristic, NodeId, RoadNetwork,
    SearchConfig, SearchEngine,
};

const SEEDS: [u64; 6] = [1, 7, 42, 1337, 2024, 99_991];
const SIDE: i64 = 6;
const MIN_RATE: f64 = 0.5;

struct Case {
    network: RoadNetwork,
    chargers: ChargerSet,
    config: SearchConfig,
    origin: NodeId,
    destination: NodeId,
}

fn random_case(seed: u64) -> Case {
    let mut rng = StdRng::seed_from_u64(seed);
    let id = |row: i64, col: i64| row * SIDE + col + 1;

    let mut builder = RoadNetwork::builder();
    for row in 0..SIDE {
        for col in 0..SIDE {
            let x = col as f64 + rng.random_range(-0.2..0.2);
            let y = row as f64 + rng.random_range(-0.2..0.2);
            builder = builder.node(id(row, col), x, y);
        }
    }

    // Edge lengths overstate the straight-line distance so explicit costs of
    // at least `MIN_RATE` per km keep the heuristic a lower bound.
    for row in 0..SIDE {
        for col in 0..SIDE {
            let here = id(row, col);
            let mut neighbours = Vec::new();
            if col + 1 < SIDE {
                neighbours.push(id(row, col + 1));
            }
            if row + 1 < SIDE {
                neighbours.push(id(row + 1, col));
            }
            for there in neighbours {
                if rng.random_bool(0.15) {
                    continue;
                }
                let cost = (rng.random_range(1.0..3.0) * 10.0_f64).round() / 10.0;
                let edge = Edge::new(there, 2000.0).with_energy_cost(cost);
                builder = builder.bidirectional(here, there, edge);
            }
        }
    }
    let network = builder.build().expect("random grid is valid");

    let mut chargers = ChargerSet::new();
    for node in network.node_ids() {
        if rng.random_bool(0.2) {
            chargers.insert(node);
        }
    }

    let capacity = f64::from(rng.random_range(4_u32..9));
    let config = SearchConfig {
        max_capacity: capacity,
        initial_charge: capacity,
        consumption_rate: MIN_RATE,
        min_consumption_rate: MIN_RATE,
        recharge_amount: f64::from(rng.random_range(2_u32..6)),
        step: 0.1,
        ..SearchConfig::default()
    };

    Case {
        network,
        chargers,
        config,
        origin: id(0, 0),
        destination: id(SIDE - 1, SIDE - 1),
    }
}

#[test]
fn energy_a_star_never_loses_to_greedy() {
    for seed in SEEDS {
        let case = random_case(seed);
        let engine = SearchEngine::new(&case.network, &case.chargers, &case.config).unwrap();
        let a_star = engine
            .search(SearchPolicy::EnergyAStar, case.origin, case.destination)
            .unwrap();
        let greedy = engine
            .search(SearchPolicy::Greedy, case.origin, case.destination)
            .unwrap();

        if let (Some(a_star), Some(greedy)) = (a_star.found(), greedy.found()) {
            assert!(
                a_star.total_energy <= greedy.total_energy + 1e-9,
                "seed {seed}: a* {} > greedy {}",
                a_star.total_energy,
                greedy.total_energy
            );
        }
        if greedy.is_found() {
            assert!(a_star.is_found(), "seed {seed}: greedy found a route a* missed");
        }
    }
}

#[test]
fn heuristic_does_not_change_optimal_energy() {
    for seed in SEEDS {
        let case = random_case(seed);
        let engine = SearchEngine::new(&case.network, &case.chargers, &case.config).unwrap();
        let guided = engine
            .search(SearchPolicy::EnergyAStar, case.origin, case.destination)
            .unwrap();
        let uniform = engine
            .clone()
            .with_heuristic(Heuristic::zero())
            .search(SearchPolicy::EnergyAStar, case.origin, case.destination)
            .unwrap();

        match (guided.found(), uniform.found()) {
            (Some(guided), Some(uniform)) => {
                assert!(
                    (guided.total_energy - uniform.total_energy).abs() < 1e-9,
                    "seed {seed}: {} != {}",
                    guided.total_energy,
                    uniform.total_energy
                );
            }
            (None, None) => {}
            _ => panic!("seed {seed}: reachability differs between heuristics"),
        }
    }
}

#[test]
fn no_state_is_expanded_twice() {
    for seed in SEEDS {
        let case = random_case(seed);
        let engine = SearchEngine::new(&case.network, &case.chargers, &case.config).unwrap();
        for policy in [SearchPolicy::EnergyAStar, SearchPolicy::Greedy] {
            let mut recorder = ExpansionRecorder::new();
            let outcome = engine
                .search_observed(policy, case.origin, case.destination, &mut recorder)
                .unwrap();

            let mut seen = HashSet::new();
            for state in recorder.expanded_states() {
                assert!(seen.insert(*state), "seed {seed}: {state:?} expanded twice");
            }
            assert_eq!(recorder.len(), outcome.stats().nodes_expanded);
        }
    }
}

#[test]
fn routes_respect_battery_bounds() {
    for seed in SEEDS {
        let case = random_case(seed);
        let engine = SearchEngine::new(&case.network, &case.chargers, &case.config).unwrap();
        let SearchOutcome::Found(result) = engine
            .search(SearchPolicy::EnergyAStar, case.origin, case.destination)
            .unwrap()
        else {
            continue;
        };

        let grid = engine.discretizer();
        let trace = result.trace(&case.chargers);
        assert_eq!(trace.first().map(|step| step.node), Some(case.origin));
        assert_eq!(trace.last().map(|step| step.node), Some(case.destination));
        for step in &trace {
            assert!(step.battery <= grid.max_level());
        }
        for pair in trace.windows(2) {
            if pair[1].recharged_here {
                assert!(case.chargers.contains(pair[1].node));
                assert!(pair[1].battery > pair[0].battery);
            } else {
                let edge = case
                    .network
                    .edge_between(pair[0].node, pair[1].node)
                    .expect("consecutive nodes are connected");
                let cost = edge.energy_cost.unwrap_or_default();
                assert!(grid.energy(pair[0].battery) + 1e-9 >= cost);
            }
        }
    }
}

#[test]
fn path_is_projection_of_trace() {
    for seed in SEEDS {
        let case = random_case(seed);
        let engine = SearchEngine::new(&case.network, &case.chargers, &case.config).unwrap();
        for policy in [SearchPolicy::EnergyAStar, SearchPolicy::Greedy] {
            let Some(result) = engine
                .search(policy, case.origin, case.destination)
                .unwrap()
                .into_found()
            else {
                continue;
            };

            let trace = result.trace(&case.chargers);
            let mut projected: Vec<NodeId> = Vec::new();
            for step in &trace {
                if projected.last() != Some(&step.node) {
                    projected.push(step.node);
                }
            }
            assert_eq!(result.path(), projected);
            assert_eq!(reconstruct(result.predecessors(), result.goal), projected);
            assert_eq!(
                result.recharges,
                trace.iter().filter(|step| step.recharged_here).count()
            );
        }
    }
}
