//! Nondeterministic finite automaton with epsilon moves.
//!
//! The DFA's subset construction consumes the read-only surface of this
//! type: the state accessors, `lambda_closure`, and `move_closure`.

use crate::automaton::Automaton;
use crate::error::{AutomatonError, Result};
use crate::state::State;
use crate::symbol::Symbol;
use indexmap::IndexMap;
use std::collections::BTreeSet;

/// Moves out of a single state: input symbol (or epsilon) to the set of
/// end states.
pub type NfaPaths = IndexMap<Symbol, BTreeSet<State>>;

/// The full NFA transition table: one [`NfaPaths`] entry per state.
pub type NfaTransitions = IndexMap<State, NfaPaths>;

/// A nondeterministic finite automaton.
///
/// Transition keys may include [`Symbol::EPSILON`] for lambda moves,
/// and the table is inherently partial: a missing (state, symbol) entry
/// simply contributes no successors.
#[derive(Debug, Clone)]
pub struct Nfa {
    states: BTreeSet<State>,
    input_symbols: BTreeSet<Symbol>,
    transitions: NfaTransitions,
    initial_state: State,
    final_states: BTreeSet<State>,
}

impl Nfa {
    /// Construct an NFA, validating every invariant before returning.
    pub fn new(
        states: BTreeSet<State>,
        input_symbols: BTreeSet<Symbol>,
        transitions: NfaTransitions,
        initial_state: State,
        final_states: BTreeSet<State>,
    ) -> Result<Self> {
        let nfa = Self {
            states,
            input_symbols,
            transitions,
            initial_state,
            final_states,
        };
        nfa.validate()?;
        Ok(nfa)
    }

    pub fn transitions(&self) -> &NfaTransitions {
        &self.transitions
    }

    /// The epsilon closure of a single state: everything reachable
    /// through lambda moves alone, including the state itself.
    pub fn lambda_closure(&self, state: &State) -> BTreeSet<State> {
        let mut closure = BTreeSet::new();
        let mut stack = vec![state.clone()];
        while let Some(current) = stack.pop() {
            if !closure.insert(current.clone()) {
                continue;
            }
            if let Some(destinations) = self
                .transitions
                .get(&current)
                .and_then(|paths| paths.get(&Symbol::EPSILON))
            {
                for next in destinations {
                    if !closure.contains(next) {
                        stack.push(next.clone());
                    }
                }
            }
        }
        closure
    }

    /// Direct successors of `state` on `symbol`, without closure.
    pub fn next_states(&self, state: &State, symbol: &Symbol) -> BTreeSet<State> {
        self.transitions
            .get(state)
            .and_then(|paths| paths.get(symbol))
            .cloned()
            .unwrap_or_default()
    }

    /// Successors of a set of states on `symbol`, epsilon-closed.
    pub fn move_closure(&self, states: &BTreeSet<State>, symbol: &Symbol) -> BTreeSet<State> {
        let mut reached = BTreeSet::new();
        for state in states {
            reached.extend(self.next_states(state, symbol));
        }
        let mut closed = BTreeSet::new();
        for state in &reached {
            closed.extend(self.lambda_closure(state));
        }
        closed
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

    fn validate_transition_symbols(&self, start_state: &State, paths: &NfaPaths) -> Result<()> {
        for symbol in paths.keys() {
            if !symbol.is_epsilon() && !self.input_symbols.contains(symbol) {
                return Err(AutomatonError::InvalidSymbol(format!(
                    "state {start_state} has an invalid transition symbol {symbol}"
                )));
            }
        }
        Ok(())
    }

    fn validate_transition_end_states(&self, start_state: &State, paths: &NfaPaths) -> Result<()> {
        for end_state in paths.values().flatten() {
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
        let invalid: Vec<String> = self
            .final_states
            .difference(&self.states)
            .map(|state| state.to_string())
            .collect();
        if !invalid.is_empty() {
            return Err(AutomatonError::InvalidState(format!(
                "final states are not valid ({})",
                invalid.join(", ")
            )));
        }
        Ok(())
    }
}

impl Automaton for Nfa {
    type Config = BTreeSet<State>;

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
            self.validate_transition_symbols(start_state, paths)?;
            self.validate_transition_end_states(start_state, paths)?;
        }
        self.validate_initial_state()?;
        self.validate_initial_state_transitions()?;
        self.validate_final_states()?;
        Ok(())
    }

    /// Step through the input word over set configurations, starting
    /// from the closure of the initial state.
    fn read_input_stepwise(&self, input: &[Symbol]) -> Result<Vec<BTreeSet<State>>> {
        let mut steps = Vec::with_capacity(input.len() + 1);
        let mut current_states = self.lambda_closure(&self.initial_state);
        steps.push(current_states.clone());
        for symbol in input {
            current_states = self.move_closure(&current_states, symbol);
            if current_states.is_empty() {
                return Err(AutomatonError::Rejection(format!(
                    "input symbol {symbol} has no transition from the current states"
                )));
            }
            steps.push(current_states.clone());
        }
        if current_states.is_disjoint(&self.final_states) {
            return Err(AutomatonError::Rejection(format!(
                "the NFA stopped on non-final states {}",
                crate::state::stringify_states(&current_states)
            )));
        }
        Ok(steps)
    }
}
