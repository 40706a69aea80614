//! Shared abstraction over finite automata.

use crate::error::Result;
use crate::state::State;
use crate::symbol::Symbol;
use std::collections::BTreeSet;

/// Common surface of all finite automata.
///
/// `Config` is the recognizer's per-step configuration: a single
/// [`State`] for a DFA, a set of states for an NFA.
pub trait Automaton {
    type Config;

    fn states(&self) -> &BTreeSet<State>;

    fn input_symbols(&self) -> &BTreeSet<Symbol>;

    fn initial_state(&self) -> &State;

    fn final_states(&self) -> &BTreeSet<State>;

    /// Re-run the construction invariants. Returns `Ok(())` on every
    /// successfully constructed instance.
    fn validate(&self) -> Result<()>;

    /// Read an input word and materialize the configuration at each
    /// step, starting with the initial configuration. Fails with a
    /// rejection as soon as the word leaves the language.
    fn read_input_stepwise(&self, input: &[Symbol]) -> Result<Vec<Self::Config>>;

    /// Read an input word and return the final configuration.
    fn read_input(&self, input: &[Symbol]) -> Result<Self::Config> {
        let mut steps = self.read_input_stepwise(input)?;
        Ok(steps
            .pop()
            .expect("read_input_stepwise yields at least the initial configuration"))
    }

    /// Check whether the automaton accepts the given input word.
    ///
    /// Converts exactly the Rejection family to `Ok(false)`; structural
    /// errors propagate rather than being masked.
    fn accepts_input(&self, input: &[Symbol]) -> Result<bool> {
        match self.read_input(input) {
            Ok(_) => Ok(true),
            Err(err) if err.is_rejection() => Ok(false),
            Err(err) => Err(err),
        }
    }
}
