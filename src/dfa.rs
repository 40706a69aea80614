//! Deterministic finite automaton with Hopcroft minimization and
//! language algebra.

use crate::automaton::Automaton;
use crate::error::{AutomatonError, Result};
use crate::graph::StateGraph;
use crate::nfa::Nfa;
use crate::state::{stringify_states, stringify_states_unsorted, State, StateId, StateIndex, StateSet};
use crate::subset_construction::subset_construction;
use crate::symbol::Symbol;
use indexmap::IndexMap;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt;
use std::ops::Sub;

/// Moves out of a single state: input symbol to end state.
pub type Paths = IndexMap<Symbol, State>;

/// The full transition table: one [`Paths`] entry per state.
pub type Transitions = IndexMap<State, Paths>;

/// Options shared by the product-based boolean operations.
#[derive(Debug, Clone, Copy)]
pub struct ProductOptions {
    /// Keep composite state names in the result instead of renaming
    /// equivalence classes to ordinals.
    pub retain_names: bool,
    /// Minimize the result; when false the raw product is returned.
    pub minify: bool,
}

impl Default for ProductOptions {
    fn default() -> Self {
        Self {
            retain_names: false,
            minify: true,
        }
    }
}

/// A deterministic finite automaton.
///
/// The five-tuple (Q, Σ, δ, q₀, F) plus an `allow_partial` flag; when
/// the flag is false, δ must be total over Q×Σ. Instances are immutable
/// once constructed, and every algebraic operation returns a new DFA.
#[derive(Debug, Clone)]
pub struct Dfa {
    states: BTreeSet<State>,
    input_symbols: BTreeSet<Symbol>,
    transitions: Transitions,
    initial_state: State,
    final_states: BTreeSet<State>,
    allow_partial: bool,
}

impl Dfa {
    /// Construct a DFA with a total transition table, validating every
    /// invariant before returning.
    pub fn new(
        states: BTreeSet<State>,
        input_symbols: BTreeSet<Symbol>,
        transitions: Transitions,
        initial_state: State,
        final_states: BTreeSet<State>,
    ) -> Result<Self> {
        Self::from_parts(
            states,
            input_symbols,
            transitions,
            initial_state,
            final_states,
            false,
        )
    }

    /// Construct a DFA whose transition table may omit moves; reading
    /// a missing move rejects the input.
    pub fn new_partial(
        states: BTreeSet<State>,
        input_symbols: BTreeSet<Symbol>,
        transitions: Transitions,
        initial_state: State,
        final_states: BTreeSet<State>,
    ) -> Result<Self> {
        Self::from_parts(
            states,
            input_symbols,
            transitions,
            initial_state,
            final_states,
            true,
        )
    }

    pub(crate) fn from_parts(
        states: BTreeSet<State>,
        input_symbols: BTreeSet<Symbol>,
        transitions: Transitions,
        initial_state: State,
        final_states: BTreeSet<State>,
        allow_partial: bool,
    ) -> Result<Self> {
        let dfa = Self {
            states,
            input_symbols,
            transitions,
            initial_state,
            final_states,
            allow_partial,
        };
        dfa.validate()?;
        Ok(dfa)
    }

    /// Convert an NFA into an equivalent DFA via the subset
    /// construction.
    pub fn from_nfa(nfa: &Nfa) -> Result<Dfa> {
        subset_construction(nfa)
    }

    pub fn transitions(&self) -> &Transitions {
        &self.transitions
    }

    pub fn allow_partial(&self) -> bool {
        self.allow_partial
    }

    fn validate_transition_start_states(&self) -> Result<()> {
        for state in &self.states {
            if !self.transitions.contains_key(state) {
                return Err(AutomatonError::MissingState(format!(
                    "transition start state {state} is missing"
                )));
            }
        }
        Ok(())
    }

    fn validate_transition_missing_symbols(&self, start_state: &State, paths: &Paths) -> Result<()> {
        if self.allow_partial {
            return Ok(());
        }
        for symbol in &self.input_symbols {
            if !paths.contains_key(symbol) {
                return Err(AutomatonError::MissingSymbol(format!(
                    "state {start_state} is missing a transition for input symbol {symbol}"
                )));
            }
        }
        Ok(())
    }

    fn validate_transition_invalid_symbols(&self, start_state: &State, paths: &Paths) -> Result<()> {
        for symbol in paths.keys() {
            if !self.input_symbols.contains(symbol) {
                return Err(AutomatonError::InvalidSymbol(format!(
                    "state {start_state} has an invalid transition symbol {symbol}"
                )));
            }
        }
        Ok(())
    }

    fn validate_transition_end_states(&self, start_state: &State, paths: &Paths) -> Result<()> {
        for end_state in paths.values() {
            if !self.states.contains(end_state) {
                return Err(AutomatonError::InvalidState(format!(
                    "end state {end_state} for transition on {start_state} is invalid"
                )));
            }
        }
        Ok(())
    }

    fn validate_initial_state(&self) -> Result<()> {
        if !self.states.contains(&self.initial_state) {
            return Err(AutomatonError::InvalidState(format!(
                "{} is not a valid initial state",
                self.initial_state
            )));
        }
        Ok(())
    }

    fn validate_initial_state_transitions(&self) -> Result<()> {
        if !self.transitions.contains_key(&self.initial_state) {
            return Err(AutomatonError::MissingState(format!(
                "initial state {} has no transitions defined",
                self.initial_state
            )));
        }
        Ok(())
    }

    fn validate_final_states(&self) -> Result<()> {
        let invalid: Vec<&State> = self.final_states.difference(&self.states).collect();
        if !invalid.is_empty() {
            return Err(AutomatonError::InvalidState(format!(
                "final states are not valid ({})",
                join_names(invalid)
            )));
        }
        Ok(())
    }

    /// Follow the transition for `symbol` out of `current_state`, or
    /// reject the input if none is defined.
    fn get_next_state(&self, current_state: &State, symbol: &Symbol) -> Result<State> {
        match self
            .transitions
            .get(current_state)
            .and_then(|paths| paths.get(symbol))
        {
            Some(next) => Ok(next.clone()),
            None => Err(AutomatonError::Rejection(format!(
                "{symbol} is not a valid input symbol"
            ))),
        }
    }

    fn check_for_input_rejection(&self, current_state: &State) -> Result<()> {
        if !self.final_states.contains(current_state) {
            return Err(AutomatonError::Rejection(format!(
                "the DFA stopped on a non-final state {current_state}"
            )));
        }
        Ok(())
    }

    /// Create a minimal DFA accepting the same language.
    ///
    /// Unreachable states are removed first, then equivalent states are
    /// merged by Hopcroft partition refinement. With `retain_names`,
    /// merged classes keep their member names as a sorted composite
    /// label; otherwise classes are named 0..n-1.
    pub fn minify(&self, retain_names: bool) -> Dfa {
        let mut dfa = self.clone();
        dfa.remove_unreachable_states();
        dfa.merge_states(retain_names);
        debug_assert!(dfa.validate().is_ok());
        dfa
    }

    fn compute_reachable_states(&self) -> BTreeSet<State> {
        let mut reachable = BTreeSet::new();
        let mut queue = VecDeque::new();
        reachable.insert(self.initial_state.clone());
        queue.push_back(self.initial_state.clone());
        while let Some(state) = queue.pop_front() {
            if let Some(paths) = self.transitions.get(&state) {
                for next in paths.values() {
                    if reachable.insert(next.clone()) {
                        queue.push_back(next.clone());
                    }
                }
            }
        }
        reachable
    }

    fn remove_unreachable_states(&mut self) {
        let reachable = self.compute_reachable_states();
        let unreachable: Vec<State> = self
            .states
            .iter()
            .filter(|state| !reachable.contains(*state))
            .cloned()
            .collect();
        for state in &unreachable {
            self.states.remove(state);
            self.transitions.shift_remove(state);
            self.final_states.remove(state);
        }
        if !unreachable.is_empty() {
            log::trace!("removed {} unreachable states", unreachable.len());
        }
    }

    /// Merge equivalent states by partition refinement.
    ///
    /// Runs on dense ids; a partial table is completed with a trap id
    /// for the duration of refinement so that defined and undefined
    /// moves on the same symbol distinguish states. The trap's class is
    /// dropped again when the DFA is rebuilt.
    fn merge_states(&mut self, retain_names: bool) {
        let labels: Vec<State> = self.states.iter().cloned().collect();
        let mut index = StateIndex::new();
        for state in &labels {
            index.intern(state);
        }
        let real = labels.len();
        let symbols: Vec<Symbol> = self.input_symbols.iter().cloned().collect();

        let mut missing = false;
        for state in &labels {
            match self.transitions.get(state) {
                Some(paths) => {
                    if symbols.iter().any(|symbol| !paths.contains_key(symbol)) {
                        missing = true;
                        break;
                    }
                }
                None => {
                    missing = true;
                    break;
                }
            }
        }
        let total = real + usize::from(missing);
        let trap_id = real as StateId;

        // Dense transition table, trap-completed.
        let mut delta: Vec<Vec<StateId>> = vec![vec![0; total]; symbols.len()];
        for (src, state) in labels.iter().enumerate() {
            let paths = self.transitions.get(state);
            for (sym_idx, symbol) in symbols.iter().enumerate() {
                delta[sym_idx][src] = match paths.and_then(|paths| paths.get(symbol)) {
                    Some(next) => index
                        .get(next)
                        .expect("validated transition target is a known state"),
                    // only reachable when the table is partial, so the
                    // trap id exists
                    None => trap_id,
                };
            }
        }
        if missing {
            for row in delta.iter_mut() {
                row[trap_id as usize] = trap_id;
            }
        }

        // Reverse table: preimage[symbol][target] = sources.
        let mut preimage: Vec<Vec<StateSet>> =
            vec![vec![StateSet::empty(total); total]; symbols.len()];
        for (sym_idx, row) in delta.iter().enumerate() {
            for (src, &dst) in row.iter().enumerate() {
                preimage[sym_idx][dst as usize].insert(src as StateId);
            }
        }

        // Initial partition {F, Q \ F}, empty blocks dropped; the
        // worklist starts with the accepting block.
        let mut final_ids = StateSet::empty(total);
        for state in &self.final_states {
            if let Some(id) = index.get(state) {
                final_ids.insert(id);
            }
        }
        let non_final_ids = final_ids.complement();

        let mut partitions: Vec<StateSet> = Vec::new();
        let mut worklist: VecDeque<usize> = VecDeque::new();
        let mut queued: Vec<bool> = Vec::new();
        if !final_ids.is_empty() {
            worklist.push_back(partitions.len());
            queued.push(true);
            partitions.push(final_ids);
        }
        if !non_final_ids.is_empty() {
            partitions.push(non_final_ids);
            queued.push(false);
        }

        while let Some(active_idx) = worklist.pop_front() {
            queued[active_idx] = false;
            let active = partitions[active_idx].clone();
            for (sym_idx, _) in symbols.iter().enumerate() {
                let mut movers = StateSet::empty(total);
                for target in active.iter() {
                    movers.union_with(&preimage[sym_idx][target as usize]);
                }
                if movers.is_empty() {
                    continue;
                }
                let mut block = 0;
                while block < partitions.len() {
                    let Some((moved, kept)) = partitions[block].split_on(&movers) else {
                        block += 1;
                        continue;
                    };
                    partitions[block] = moved;
                    partitions.push(kept);
                    let new_idx = partitions.len() - 1;
                    if queued[block] {
                        // the refined block was queued; keep both halves
                        queued.push(true);
                        worklist.push_back(new_idx);
                    } else if partitions[block].len() <= partitions[new_idx].len() {
                        queued[block] = true;
                        worklist.push_back(block);
                        queued.push(false);
                    } else {
                        queued.push(true);
                        worklist.push_back(new_idx);
                    }
                    block += 1;
                }
            }
        }

        // Equivalence classes as sorted member vectors, trap dropped,
        // enumerated in ascending order for stable renaming.
        let mut classes: Vec<Vec<State>> = partitions
            .iter()
            .map(|block| {
                block
                    .iter()
                    .filter(|&id| (id as usize) < real)
                    .map(|id| labels[id as usize].clone())
                    .collect::<Vec<State>>()
            })
            .filter(|members| !members.is_empty())
            .collect();
        classes.sort();

        let rename = |members: &[State]| -> State {
            if members.len() == 1 {
                members[0].clone()
            } else {
                stringify_states(members)
            }
        };
        let class_name = |ordinal: usize, members: &[State]| -> State {
            if retain_names {
                rename(members)
            } else {
                State::from(ordinal.to_string())
            }
        };

        let mut back_map: BTreeMap<State, State> = BTreeMap::new();
        let mut new_states = BTreeSet::new();
        for (ordinal, members) in classes.iter().enumerate() {
            let name = class_name(ordinal, members);
            for member in members {
                back_map.insert(member.clone(), name.clone());
            }
            new_states.insert(name);
        }

        let mut new_transitions = Transitions::new();
        for (ordinal, members) in classes.iter().enumerate() {
            let name = class_name(ordinal, members);
            let representative = &members[0];
            let mut paths = Paths::new();
            if let Some(old_paths) = self.transitions.get(representative) {
                for symbol in &symbols {
                    if let Some(next) = old_paths.get(symbol) {
                        if let Some(new_next) = back_map.get(next) {
                            paths.insert(symbol.clone(), new_next.clone());
                        }
                    }
                }
            }
            new_transitions.insert(name, paths);
        }

        let new_initial = back_map
            .get(&self.initial_state)
            .cloned()
            .expect("the initial state is always reachable");
        let new_finals: BTreeSet<State> = self
            .final_states
            .iter()
            .filter_map(|state| back_map.get(state).cloned())
            .collect();

        log::debug!(
            "merged {} states into {} equivalence classes",
            real,
            classes.len()
        );

        self.states = new_states;
        self.transitions = new_transitions;
        self.initial_state = new_initial;
        self.final_states = new_finals;
    }

    /// The synchronous product of two DFAs over the same alphabet, with
    /// an empty set of final states. Composite states are named by the
    /// ordered (left, right) pair.
    fn cross_product(&self, other: &Dfa) -> Result<Dfa> {
        if self.input_symbols != other.input_symbols {
            return Err(AutomatonError::InvalidSymbol(format!(
                "input symbol sets do not match: {{{}}} vs {{{}}}",
                join_names(&self.input_symbols),
                join_names(&other.input_symbols)
            )));
        }

        let mut new_states = BTreeSet::new();
        let mut new_transitions = Transitions::new();
        for (state_a, paths_a) in &self.transitions {
            for (state_b, paths_b) in &other.transitions {
                let name = stringify_states_unsorted([state_a, state_b]);
                let mut paths = Paths::new();
                for symbol in &self.input_symbols {
                    if let (Some(next_a), Some(next_b)) = (paths_a.get(symbol), paths_b.get(symbol))
                    {
                        paths.insert(symbol.clone(), stringify_states_unsorted([next_a, next_b]));
                    }
                }
                new_states.insert(name.clone());
                new_transitions.insert(name, paths);
            }
        }
        let new_initial = stringify_states_unsorted([&self.initial_state, &other.initial_state]);

        Dfa::from_parts(
            new_states,
            self.input_symbols.clone(),
            new_transitions,
            new_initial,
            BTreeSet::new(),
            self.allow_partial || other.allow_partial,
        )
    }

    fn finish_product(product: Dfa, opts: ProductOptions) -> Dfa {
        if opts.minify {
            product.minify(opts.retain_names)
        } else {
            product
        }
    }

    /// A DFA accepting L(self) ∪ L(other).
    pub fn union(&self, other: &Dfa, opts: ProductOptions) -> Result<Dfa> {
        let mut product = self.cross_product(other)?;
        for state_a in &self.states {
            for state_b in &other.states {
                if self.final_states.contains(state_a) || other.final_states.contains(state_b) {
                    product
                        .final_states
                        .insert(stringify_states_unsorted([state_a, state_b]));
                }
            }
        }
        Ok(Self::finish_product(product, opts))
    }

    /// A DFA accepting L(self) ∩ L(other).
    pub fn intersection(&self, other: &Dfa, opts: ProductOptions) -> Result<Dfa> {
        let mut product = self.cross_product(other)?;
        for state_a in &self.final_states {
            for state_b in &other.final_states {
                product
                    .final_states
                    .insert(stringify_states_unsorted([state_a, state_b]));
            }
        }
        Ok(Self::finish_product(product, opts))
    }

    /// A DFA accepting L(self) \ L(other).
    pub fn difference(&self, other: &Dfa, opts: ProductOptions) -> Result<Dfa> {
        let mut product = self.cross_product(other)?;
        for state_a in &self.final_states {
            for state_b in &other.states {
                if !other.final_states.contains(state_b) {
                    product
                        .final_states
                        .insert(stringify_states_unsorted([state_a, state_b]));
                }
            }
        }
        Ok(Self::finish_product(product, opts))
    }

    /// A DFA accepting the symmetric difference of the two languages.
    pub fn symmetric_difference(&self, other: &Dfa, opts: ProductOptions) -> Result<Dfa> {
        let mut product = self.cross_product(other)?;
        for state_a in &self.states {
            for state_b in &other.states {
                let final_a = self.final_states.contains(state_a);
                let final_b = other.final_states.contains(state_b);
                if final_a != final_b {
                    product
                        .final_states
                        .insert(stringify_states_unsorted([state_a, state_b]));
                }
            }
        }
        Ok(Self::finish_product(product, opts))
    }

    /// A copy accepting the complement language: F becomes Q \ F.
    ///
    /// On a partial DFA the complement is taken against the existing
    /// state set.
    pub fn complement(&self) -> Dfa {
        let mut new_dfa = self.clone();
        new_dfa.final_states = self
            .states
            .difference(&self.final_states)
            .cloned()
            .collect();
        new_dfa
    }

    /// True iff L(self) ⊆ L(other).
    pub fn is_subset(&self, other: &Dfa) -> Result<bool> {
        Ok(&self.intersection(other, ProductOptions::default())? == self)
    }

    /// True iff L(self) ⊇ L(other).
    pub fn is_superset(&self, other: &Dfa) -> Result<bool> {
        other.is_subset(self)
    }

    /// True iff the two languages share no word.
    pub fn is_disjoint(&self, other: &Dfa) -> Result<bool> {
        Ok(self.intersection(other, ProductOptions::default())?.is_empty())
    }

    /// True iff the language is empty.
    pub fn is_empty(&self) -> bool {
        self.minify(true).final_states.is_empty()
    }

    /// True iff the language is finite.
    ///
    /// Builds the transition graph, keeps the nodes that are both
    /// accessible from q₀ and coaccessible to some final state, and
    /// checks the induced subgraph for a cycle.
    pub fn is_finite(&self) -> bool {
        let labels: Vec<&State> = self.states.iter().collect();
        let mut index = StateIndex::new();
        for state in &labels {
            index.intern(state);
        }

        let mut graph = StateGraph::with_nodes(labels.len());
        for (src, paths) in &self.transitions {
            let Some(src_id) = index.get(src) else {
                continue;
            };
            for next in paths.values() {
                if let Some(dst_id) = index.get(next) {
                    graph.add_edge(src_id, dst_id);
                }
            }
        }

        let Some(initial_id) = index.get(&self.initial_state) else {
            return true;
        };
        let accessible = graph.reachable_from(initial_id);

        let mut final_ids = StateSet::empty(labels.len());
        for state in &self.final_states {
            if let Some(id) = index.get(state) {
                final_ids.insert(id);
            }
        }
        let coaccessible = graph.reverse().reachable_from_all(&final_ids);

        let live = accessible.intersect(&coaccessible);
        !graph.induced_subgraph(&live).has_cycle()
    }
}

impl Automaton for Dfa {
    type Config = State;

    fn states(&self) -> &BTreeSet<State> {
        &self.states
    }

    fn input_symbols(&self) -> &BTreeSet<Symbol> {
        &self.input_symbols
    }

    fn initial_state(&self) -> &State {
        &self.initial_state
    }

    fn final_states(&self) -> &BTreeSet<State> {
        &self.final_states
    }

    fn validate(&self) -> Result<()> {
        self.validate_transition_start_states()?;
        for (start_state, paths) in &self.transitions {
            self.validate_transition_missing_symbols(start_state, paths)?;
            self.validate_transition_invalid_symbols(start_state, paths)?;
            self.validate_transition_end_states(start_state, paths)?;
        }
        self.validate_initial_state()?;
        self.validate_initial_state_transitions()?;
        self.validate_final_states()?;
        Ok(())
    }

    fn read_input_stepwise(&self, input: &[Symbol]) -> Result<Vec<State>> {
        let mut steps = Vec::with_capacity(input.len() + 1);
        let mut current_state = self.initial_state.clone();
        steps.push(current_state.clone());
        for symbol in input {
            current_state = self.get_next_state(&current_state, symbol)?;
            steps.push(current_state.clone());
        }
        self.check_for_input_rejection(&current_state)?;
        Ok(steps)
    }
}

/// Language equality: two DFAs are equal iff their symmetric difference
/// is empty. DFAs over different alphabets are never equal.
impl PartialEq for Dfa {
    fn eq(&self, other: &Self) -> bool {
        match self.symmetric_difference(other, ProductOptions::default()) {
            Ok(diff) => diff.is_empty(),
            Err(_) => false,
        }
    }
}

/// Language inclusion: `<` is proper subset, `<=` is subset. DFAs over
/// different alphabets are incomparable.
impl PartialOrd for Dfa {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let subset = self.is_subset(other).ok()?;
        let superset = self.is_superset(other).ok()?;
        match (subset, superset) {
            (true, true) => Some(Ordering::Equal),
            (true, false) => Some(Ordering::Less),
            (false, true) => Some(Ordering::Greater),
            (false, false) => None,
        }
    }
}

/// `a - b` is shorthand for `a.difference(b)` with default options.
impl Sub for &Dfa {
    type Output = Result<Dfa>;

    fn sub(self, other: &Dfa) -> Result<Dfa> {
        self.difference(other, ProductOptions::default())
    }
}

fn join_names<T: fmt::Display>(items: impl IntoIterator<Item = T>) -> String {
    items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_set(names: &[&str]) -> BTreeSet<State> {
        names.iter().copied().map(State::from).collect()
    }

    fn symbol_set(names: &[&str]) -> BTreeSet<Symbol> {
        names.iter().copied().map(Symbol::from).collect()
    }

    fn table(entries: &[(&str, &[(&str, &str)])]) -> Transitions {
        entries
            .iter()
            .map(|(state, paths)| {
                (
                    State::from(*state),
                    paths
                        .iter()
                        .map(|(symbol, next)| (Symbol::from(*symbol), State::from(*next)))
                        .collect(),
                )
            })
            .collect()
    }

    fn word(symbols: &[&str]) -> Vec<Symbol> {
        symbols.iter().copied().map(Symbol::from).collect()
    }

    /// Accepts words over {0,1} ending in an odd run of ones.
    fn sample_dfa() -> Dfa {
        Dfa::new(
            state_set(&["q0", "q1", "q2"]),
            symbol_set(&["0", "1"]),
            table(&[
                ("q0", &[("0", "q0"), ("1", "q1")]),
                ("q1", &[("0", "q0"), ("1", "q2")]),
                ("q2", &[("0", "q2"), ("1", "q1")]),
            ]),
            State::from("q0"),
            state_set(&["q1"]),
        )
        .unwrap()
    }

    #[test]
    fn test_validate_missing_transition_state() {
        let err = Dfa::new(
            state_set(&["q0", "q1", "q2"]),
            symbol_set(&["0", "1"]),
            table(&[
                ("q0", &[("0", "q0"), ("1", "q1")]),
                ("q2", &[("0", "q2"), ("1", "q2")]),
            ]),
            State::from("q0"),
            state_set(&["q1"]),
        )
        .unwrap_err();
        assert_eq!(
            err,
            AutomatonError::MissingState("transition start state q1 is missing".into())
        );
    }

    #[test]
    fn test_validate_missing_symbol() {
        let err = Dfa::new(
            state_set(&["q0", "q1", "q2"]),
            symbol_set(&["0", "1"]),
            table(&[
                ("q0", &[("0", "q0"), ("1", "q1")]),
                ("q1", &[("0", "q2")]),
                ("q2", &[("0", "q2"), ("1", "q2")]),
            ]),
            State::from("q0"),
            state_set(&["q1"]),
        )
        .unwrap_err();
        assert!(matches!(err, AutomatonError::MissingSymbol(_)));
    }

    #[test]
    fn test_validate_partial_skips_missing_symbols() {
        let dfa = Dfa::new_partial(
            state_set(&["q0", "q1"]),
            symbol_set(&["0", "1"]),
            table(&[("q0", &[("1", "q1")]), ("q1", &[])]),
            State::from("q0"),
            state_set(&["q1"]),
        )
        .unwrap();
        assert!(dfa.allow_partial());
        assert!(dfa.accepts_input(&word(&["1"])).unwrap());
        assert!(!dfa.accepts_input(&word(&["0"])).unwrap());
    }

    #[test]
    fn test_validate_invalid_symbol() {
        let err = Dfa::new(
            state_set(&["q0", "q1", "q2"]),
            symbol_set(&["0", "1"]),
            table(&[
                ("q0", &[("0", "q0"), ("1", "q1")]),
                ("q1", &[("0", "q2"), ("1", "q1"), ("2", "q2")]),
                ("q2", &[("0", "q2"), ("1", "q2")]),
            ]),
            State::from("q0"),
            state_set(&["q1"]),
        )
        .unwrap_err();
        assert_eq!(
            err,
            AutomatonError::InvalidSymbol("state q1 has an invalid transition symbol 2".into())
        );
    }

    #[test]
    fn test_validate_invalid_end_state() {
        let err = Dfa::new(
            state_set(&["q0", "q1", "q2"]),
            symbol_set(&["0", "1"]),
            table(&[
                ("q0", &[("0", "q0"), ("1", "q1")]),
                ("q1", &[("0", "q2"), ("1", "q3")]),
                ("q2", &[("0", "q2"), ("1", "q2")]),
            ]),
            State::from("q0"),
            state_set(&["q1"]),
        )
        .unwrap_err();
        assert!(matches!(err, AutomatonError::InvalidState(_)));
    }

    #[test]
    fn test_validate_invalid_initial_state() {
        let err = Dfa::new(
            state_set(&["q0", "q1"]),
            symbol_set(&["0"]),
            table(&[("q0", &[("0", "q1")]), ("q1", &[("0", "q1")])]),
            State::from("q9"),
            state_set(&["q1"]),
        )
        .unwrap_err();
        assert_eq!(
            err,
            AutomatonError::InvalidState("q9 is not a valid initial state".into())
        );
    }

    #[test]
    fn test_validate_invalid_final_state() {
        let err = Dfa::new(
            state_set(&["q0", "q1"]),
            symbol_set(&["0"]),
            table(&[("q0", &[("0", "q1")]), ("q1", &[("0", "q1")])]),
            State::from("q0"),
            state_set(&["q3"]),
        )
        .unwrap_err();
        assert_eq!(
            err,
            AutomatonError::InvalidState("final states are not valid (q3)".into())
        );
    }

    #[test]
    fn test_read_input_stepwise() {
        let dfa = sample_dfa();
        let steps = dfa.read_input_stepwise(&word(&["0", "1", "1", "1"])).unwrap();
        let expected: Vec<State> = ["q0", "q0", "q1", "q2", "q1"]
            .iter()
            .copied()
            .map(State::from)
            .collect();
        assert_eq!(steps, expected);
    }

    #[test]
    fn test_read_input_rejects_non_final_stop() {
        let dfa = sample_dfa();
        let err = dfa.read_input(&word(&["0", "1", "0"])).unwrap_err();
        assert_eq!(
            err,
            AutomatonError::Rejection("the DFA stopped on a non-final state q0".into())
        );
    }

    #[test]
    fn test_read_input_rejects_unknown_symbol() {
        let dfa = sample_dfa();
        let err = dfa.read_input(&word(&["0", "1", "1", "1", "2"])).unwrap_err();
        assert!(err.is_rejection());
    }

    #[test]
    fn test_minify_merges_duplicate_state() {
        // q3 duplicates q0, so the minimal DFA has three states.
        let dfa = Dfa::new(
            state_set(&["q0", "q1", "q2", "q3"]),
            symbol_set(&["0", "1"]),
            table(&[
                ("q0", &[("0", "q3"), ("1", "q1")]),
                ("q1", &[("0", "q0"), ("1", "q2")]),
                ("q2", &[("0", "q2"), ("1", "q2")]),
                ("q3", &[("0", "q0"), ("1", "q1")]),
            ]),
            State::from("q0"),
            state_set(&["q0", "q1", "q3"]),
        )
        .unwrap();

        let minimal = dfa.minify(true);
        assert_eq!(minimal.states(), &state_set(&["q0,q3", "q1", "q2"]));
        assert_eq!(minimal.initial_state(), &State::from("q0,q3"));
        assert_eq!(minimal.final_states(), &state_set(&["q0,q3", "q1"]));
        assert_eq!(
            minimal.transitions(),
            &table(&[
                ("q0,q3", &[("0", "q0,q3"), ("1", "q1")]),
                ("q1", &[("0", "q0,q3"), ("1", "q2")]),
                ("q2", &[("0", "q2"), ("1", "q2")]),
            ])
        );
        assert_eq!(dfa, minimal);
    }

    #[test]
    fn test_minify_ordinal_names() {
        let dfa = Dfa::new(
            state_set(&["q0", "q1", "q2", "q3"]),
            symbol_set(&["0", "1"]),
            table(&[
                ("q0", &[("0", "q3"), ("1", "q1")]),
                ("q1", &[("0", "q0"), ("1", "q2")]),
                ("q2", &[("0", "q2"), ("1", "q2")]),
                ("q3", &[("0", "q0"), ("1", "q1")]),
            ]),
            State::from("q0"),
            state_set(&["q0", "q1", "q3"]),
        )
        .unwrap();

        let minimal = dfa.minify(false);
        assert_eq!(minimal.states(), &state_set(&["0", "1", "2"]));
        assert_eq!(minimal.initial_state(), &State::from("0"));
        assert_eq!(minimal.final_states(), &state_set(&["0", "1"]));
        assert_eq!(dfa, minimal);
    }

    #[test]
    fn test_minify_removes_unreachable_states() {
        // q2 is unreachable from q0.
        let dfa = Dfa::new(
            state_set(&["q0", "q1", "q2"]),
            symbol_set(&["0"]),
            table(&[
                ("q0", &[("0", "q1")]),
                ("q1", &[("0", "q1")]),
                ("q2", &[("0", "q0")]),
            ]),
            State::from("q0"),
            state_set(&["q1", "q2"]),
        )
        .unwrap();

        let minimal = dfa.minify(true);
        assert!(!minimal.states().contains(&State::from("q2")));
        assert_eq!(dfa, minimal);
    }

    #[test]
    fn test_minify_is_idempotent_on_language() {
        let dfa = sample_dfa();
        assert_eq!(dfa.minify(true), dfa.minify(true).minify(true));
    }

    #[test]
    fn test_minify_partial_dfa() {
        // accepts exactly "1" and "10"; the table has no moves out of q2
        let dfa = Dfa::new_partial(
            state_set(&["q0", "q1", "q2"]),
            symbol_set(&["0", "1"]),
            table(&[
                ("q0", &[("1", "q1")]),
                ("q1", &[("0", "q2")]),
                ("q2", &[]),
            ]),
            State::from("q0"),
            state_set(&["q1", "q2"]),
        )
        .unwrap();

        let minimal = dfa.minify(true);
        assert!(minimal.allow_partial());
        assert_eq!(dfa, minimal);
        assert!(minimal.accepts_input(&word(&["1"])).unwrap());
        assert!(minimal.accepts_input(&word(&["1", "0"])).unwrap());
        assert!(!minimal.accepts_input(&word(&["0"])).unwrap());
    }

    #[test]
    fn test_cross_product_requires_matching_alphabets() {
        let a = sample_dfa();
        let b = Dfa::new(
            state_set(&["p0"]),
            symbol_set(&["a"]),
            table(&[("p0", &[("a", "p0")])]),
            State::from("p0"),
            state_set(&["p0"]),
        )
        .unwrap();
        assert!(matches!(
            a.union(&b, ProductOptions::default()),
            Err(AutomatonError::InvalidSymbol(_))
        ));
    }

    #[test]
    fn test_complement_flips_finals_only() {
        let dfa = Dfa::new(
            state_set(&["q0", "q1", "q2", "q3"]),
            symbol_set(&["0", "1"]),
            table(&[
                ("q0", &[("0", "q3"), ("1", "q1")]),
                ("q1", &[("0", "q0"), ("1", "q2")]),
                ("q2", &[("0", "q2"), ("1", "q2")]),
                ("q3", &[("0", "q0"), ("1", "q1")]),
            ]),
            State::from("q0"),
            state_set(&["q0", "q1", "q3"]),
        )
        .unwrap();

        let complement = dfa.complement();
        assert_eq!(complement.states(), dfa.states());
        assert_eq!(complement.input_symbols(), dfa.input_symbols());
        assert_eq!(complement.transitions(), dfa.transitions());
        assert_eq!(complement.initial_state(), dfa.initial_state());
        assert_eq!(complement.final_states(), &state_set(&["q2"]));
    }

    #[test]
    fn test_is_empty() {
        let mut dfa = sample_dfa();
        assert!(!dfa.is_empty());
        dfa.final_states.clear();
        assert!(dfa.is_empty());
    }

    #[test]
    fn test_is_finite() {
        // sample_dfa loops through accepting paths: infinite
        assert!(!sample_dfa().is_finite());

        // accepts exactly "0": the only cycle is the dead sink
        let just_zero = Dfa::new(
            state_set(&["q0", "q1", "dead"]),
            symbol_set(&["0"]),
            table(&[
                ("q0", &[("0", "q1")]),
                ("q1", &[("0", "dead")]),
                ("dead", &[("0", "dead")]),
            ]),
            State::from("q0"),
            state_set(&["q1"]),
        )
        .unwrap();
        assert!(just_zero.is_finite());
    }

    #[test]
    fn test_subset_operator() {
        let a = sample_dfa();
        assert_eq!(a.partial_cmp(&a), Some(Ordering::Equal));

        let empty = {
            let mut dfa = sample_dfa();
            dfa.final_states.clear();
            dfa
        };
        assert_eq!(empty.partial_cmp(&a), Some(Ordering::Less));
        assert_eq!(a.partial_cmp(&empty), Some(Ordering::Greater));
    }

    #[test]
    fn test_difference_operator() {
        let a = sample_dfa();
        let diff = (&a - &a).unwrap();
        assert!(diff.is_empty());
    }
}
