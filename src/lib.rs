//! Finite-automata library.
//!
//! Provides deterministic finite automata with:
//! - Invariant-enforced construction and validation
//! - Stepwise recognition with rejection semantics
//! - Hopcroft-style minimization
//! - Product-based language algebra (union, intersection, difference,
//!   symmetric difference, complement) and inclusion predicates
//! - A graph-analytic finiteness test
//! - Subset construction from epsilon-NFAs
//! - Dot-graph diagram emission

mod automaton;
mod dfa;
mod diagram;
mod error;
mod graph;
mod nfa;
mod state;
mod subset_construction;
mod symbol;

pub use automaton::Automaton;
pub use dfa::{Dfa, Paths, ProductOptions, Transitions};
pub use error::{AutomatonError, Result};
pub use nfa::{Nfa, NfaPaths, NfaTransitions};
pub use state::{stringify_states, stringify_states_unsorted, State};
pub use symbol::Symbol;
