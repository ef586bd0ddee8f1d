use super::State;

/// Hook invoked once per expanded state.
///
/// `new_frontier` lists the states relaxed (and pushed) while expanding
/// `state`. The goal state is reported too, with an empty list.
pub trait SearchObserver {
    fn on_expand(&mut self, state: &State, new_frontier: &[State]);
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {
    fn on_expand(&mut self, _state: &State, _new_frontier: &[State]) {}
}

/// A single recorded expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pub state: State,
    pub new_frontier: Vec<State>,
}

/// Observer that keeps every expansion in order, for replay or inspection.
#[derive(Debug, Default, Clone)]
pub struct ExpansionRecorder {
    expansions: Vec<Expansion>,
}

impl ExpansionRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expansions(&self) -> &[Expansion] {
        &self.expansions
    }

    pub fn expanded_states(&self) -> impl Iterator<Item = &State> + '_ {
        self.expansions.iter().map(|expansion| &expansion.state)
    }

    pub fn len(&self) -> usize {
        self.expansions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expansions.is_empty()
    }
}

impl SearchObserver for ExpansionRecorder {
    fn on_expand(&mut self, state: &State, new_frontier: &[State]) {
        self.expansions.push(Expansion {
            state: *state,
            new_frontier: new_frontier.to_vec(),
        });
    }
}
