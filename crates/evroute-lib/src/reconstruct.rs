//! Turning a terminal search state back into a route.
//!
//! The predecessor map links each relaxed state to the state it was reached
//! from. Walking it backwards from the goal yields every transition of the
//! route, including in-place recharges.

use std::collections::HashMap;

use crate::battery::BatteryLevel;
use crate::chargers::ChargerSet;
use crate::network::{Edge, NodeId, RoadNetwork};
use crate::search::State;

/// Map from a state to the state it was reached from.
pub type Predecessors = HashMap<State, State>;

/// For states reached by driving, the index of the edge taken within the
/// predecessor node's outgoing edges. Recharged states have no entry.
pub type EdgeChoices = HashMap<State, usize>;

/// One transition of a reconstructed route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceStep {
    pub node: NodeId,
    pub battery: BatteryLevel,
    /// `true` when this entry was reached by recharging at `node`.
    pub recharged_here: bool,
}

/// States from origin to `goal`, in travel order.
///
/// The walk is bounded by the size of the map, so a malformed (cyclic) map
/// cannot loop forever.
pub fn state_chain(predecessors: &Predecessors, goal: State) -> Vec<State> {
    let mut chain = vec![goal];
    let mut current = goal;
    while let Some(&previous) = predecessors.get(&current) {
        if chain.len() > predecessors.len() {
            break;
        }
        chain.push(previous);
        current = previous;
    }
    chain.reverse();
    chain
}

fn is_recharge(previous: &State, current: &State, chargers: &ChargerSet) -> bool {
    previous.node == current.node
        && current.battery > previous.battery
        && chargers.contains(current.node)
}

/// Node path from origin to `goal` with consecutive repeats collapsed.
pub fn reconstruct(predecessors: &Predecessors, goal: State) -> Vec<NodeId> {
    let mut path: Vec<NodeId> = Vec::new();
    for state in state_chain(predecessors, goal) {
        if path.last() != Some(&state.node) {
            path.push(state.node);
        }
    }
    path
}

/// Every transition from origin to `goal`, annotated with battery level and
/// whether the vehicle recharged to reach it.
pub fn reconstruct_with_battery(
    predecessors: &Predecessors,
    goal: State,
    chargers: &ChargerSet,
) -> Vec<TraceStep> {
    let chain = state_chain(predecessors, goal);
    let mut trace = Vec::with_capacity(chain.len());
    for (index, state) in chain.iter().enumerate() {
        let recharged_here = index > 0 && is_recharge(&chain[index - 1], state, chargers);
        trace.push(TraceStep {
            node: state.node,
            battery: state.battery,
            recharged_here,
        });
    }
    trace
}

/// Edges driven from origin to `goal`, in travel order.
///
/// Parallel edges are told apart by the recorded choice, so the result is the
/// road the search actually used rather than any edge between the same nodes.
pub fn traversed_edges<'n>(
    network: &'n RoadNetwork,
    predecessors: &Predecessors,
    choices: &EdgeChoices,
    goal: State,
) -> Vec<&'n Edge> {
    state_chain(predecessors, goal)
        .windows(2)
        .filter_map(|pair| {
            let index = *choices.get(&pair[1])?;
            network.neighbours(pair[0].node).get(index)
        })
        .collect()
}

/// Number of recharge transitions on the route to `goal`.
pub fn count_recharges(predecessors: &Predecessors, goal: State, chargers: &ChargerSet) -> usize {
    state_chain(predecessors, goal)
        .windows(2)
        .filter(|pair| is_recharge(&pair[0], &pair[1], chargers))
        .count()
}
