//! Subset construction: converting an NFA into an equivalent DFA.

use crate::automaton::Automaton;
use crate::dfa::{Dfa, Paths, Transitions};
use crate::error::Result;
use crate::nfa::Nfa;
use crate::state::{stringify_states, State};
use indexmap::IndexSet;
use std::collections::{BTreeSet, VecDeque};

/// Build the powerset DFA of `nfa`.
///
/// Each DFA state is a reachable epsilon-closed subset of NFA states,
/// named by the sorted composite label of its members. The initial DFA
/// state is the closure of the NFA's initial state; a subset is final
/// iff it contains an NFA final state. Subsets with no successor on
/// some symbol make the result partial.
pub(crate) fn subset_construction(nfa: &Nfa) -> Result<Dfa> {
    let input_symbols = nfa.input_symbols().clone();

    let initial_set = nfa.lambda_closure(nfa.initial_state());
    let initial_name = stringify_states(&initial_set);

    let mut dfa_states = BTreeSet::new();
    let mut dfa_transitions = Transitions::new();
    let mut dfa_final_states = BTreeSet::new();

    let mut seen: IndexSet<State> = IndexSet::new();
    let mut worklist: VecDeque<BTreeSet<State>> = VecDeque::new();
    seen.insert(initial_name.clone());
    worklist.push_back(initial_set);

    let mut partial = false;
    while let Some(subset) = worklist.pop_front() {
        let name = stringify_states(&subset);
        dfa_states.insert(name.clone());
        if !subset.is_disjoint(nfa.final_states()) {
            dfa_final_states.insert(name.clone());
        }

        let mut paths = Paths::new();
        for symbol in &input_symbols {
            let next_subset = nfa.move_closure(&subset, symbol);
            if next_subset.is_empty() {
                // no move on this symbol; the DFA stays partial here
                partial = true;
                continue;
            }
            let next_name = stringify_states(&next_subset);
            if seen.insert(next_name.clone()) {
                worklist.push_back(next_subset);
            }
            paths.insert(symbol.clone(), next_name);
        }
        dfa_transitions.insert(name, paths);
    }

    log::debug!(
        "subset construction produced {} DFA states from {} NFA states",
        dfa_states.len(),
        nfa.states().len()
    );

    Dfa::from_parts(
        dfa_states,
        input_symbols,
        dfa_transitions,
        initial_name,
        dfa_final_states,
        partial,
    )
}
