//! State labels, dense state sets, and the canonical naming helpers.

use fixedbitset::FixedBitSet;
use indexmap::IndexSet;
use std::fmt;

/// An opaque state label with total equality and ordering.
///
/// Labels are short strings chosen by the caller; operations that
/// manufacture states (products, minimization, subset construction)
/// build composite labels through [`stringify_states`] and
/// [`stringify_states_unsorted`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct State(String);

impl State {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for State {
    fn from(label: &str) -> Self {
        Self(label.to_owned())
    }
}

impl From<String> for State {
    fn from(label: String) -> Self {
        Self(label)
    }
}

/// Serialize a set of states as a single composite label.
///
/// Elements are joined by a single comma in ascending label order, with
/// no surrounding braces and no whitespace. Equal inputs produce
/// byte-identical output.
pub fn stringify_states<'a, I>(states: I) -> State
where
    I: IntoIterator<Item = &'a State>,
{
    let mut labels: Vec<&str> = states.into_iter().map(State::as_str).collect();
    labels.sort_unstable();
    State::from(labels.join(","))
}

/// Serialize a sequence of states as a single composite label,
/// preserving the given order.
///
/// Used by the product construction, where the pair is ordered by
/// operand position rather than by the state ordering.
pub fn stringify_states_unsorted<'a, I>(states: I) -> State
where
    I: IntoIterator<Item = &'a State>,
{
    let labels: Vec<&str> = states.into_iter().map(State::as_str).collect();
    State::from(labels.join(","))
}

/// Dense state index used by the minimizer and the graph analyzer.
pub(crate) type StateId = u32;

/// A set of states over a fixed universe of interned ids.
///
/// The universe size is decided once, by whoever interns the labels
/// (the minimizer's state universe, the analyzer's node count); every
/// set drawn from the same universe shares it, so the set algebra
/// never reallocates. Ids must stay below the universe size.
#[derive(Clone)]
pub(crate) struct StateSet {
    members: FixedBitSet,
}

impl StateSet {
    /// The empty set over a universe of `universe` state ids.
    pub fn empty(universe: usize) -> Self {
        Self {
            members: FixedBitSet::with_capacity(universe),
        }
    }

    pub fn insert(&mut self, state: StateId) {
        self.members.insert(state as usize);
    }

    pub fn remove(&mut self, state: StateId) {
        self.members.set(state as usize, false);
    }

    pub fn contains(&self, state: StateId) -> bool {
        self.members.contains(state as usize)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_clear()
    }

    pub fn len(&self) -> usize {
        self.members.count_ones(..)
    }

    /// Members in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.members.ones().map(|idx| idx as StateId)
    }

    pub fn union_with(&mut self, other: &StateSet) {
        self.members.union_with(&other.members);
    }

    /// States in both sets; used for the accessible-and-coaccessible
    /// core of the finiteness test.
    pub fn intersect(&self, other: &StateSet) -> StateSet {
        let mut result = self.clone();
        result.members.intersect_with(&other.members);
        result
    }

    /// Every id of the universe not in this set. This is how the
    /// non-accepting block of the initial refinement partition is
    /// derived from the accepting one.
    pub fn complement(&self) -> StateSet {
        let mut members = self.members.clone();
        members.toggle_range(..);
        Self { members }
    }

    /// Split this refinement block against a splitter preimage,
    /// returning the members that move into the splitter and those
    /// that do not. `None` when the block is not actually cut in two.
    pub fn split_on(&self, movers: &StateSet) -> Option<(StateSet, StateSet)> {
        let moved = self.intersect(movers);
        if moved.is_empty() || moved.len() == self.len() {
            return None;
        }
        let mut kept = self.clone();
        kept.members.difference_with(&moved.members);
        Some((moved, kept))
    }
}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Interner mapping state labels to dense ids and back.
///
/// Ids are assigned in insertion order, so interning a `BTreeSet` of
/// states yields ids in ascending label order.
pub(crate) struct StateIndex {
    labels: IndexSet<State>,
}

impl StateIndex {
    pub fn new() -> Self {
        Self {
            labels: IndexSet::new(),
        }
    }

    pub fn intern(&mut self, state: &State) -> StateId {
        let (idx, _) = self.labels.insert_full(state.clone());
        idx as StateId
    }

    pub fn get(&self, state: &State) -> Option<StateId> {
        self.labels.get_index_of(state).map(|idx| idx as StateId)
    }

    pub fn resolve(&self, id: StateId) -> Option<&State> {
        self.labels.get_index(id as usize)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }
}
