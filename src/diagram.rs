//! Dot-graph emission for DFAs.

use crate::automaton::Automaton;
use crate::dfa::Dfa;
use std::fs;
use std::io;
use std::path::Path;

impl Dfa {
    /// Serialize the DFA as a dot graph: one node line per state, one
    /// labeled edge per transition, final states drawn as double
    /// circles.
    pub fn to_dot(&self) -> String {
        let mut dot = String::new();
        dot.push_str("digraph DFA {\n");
        dot.push_str("rankdir=LR;\n");
        dot.push_str("node [shape = circle];\n");
        for state in self.states() {
            dot.push_str(&format!("{state};\n"));
        }
        for (src, paths) in self.transitions() {
            for (symbol, dst) in paths {
                dot.push_str(&format!("{src} -> {dst} [label = \"{symbol}\"];\n"));
            }
        }
        for state in self.final_states() {
            dot.push_str(&format!("{state} [shape = doublecircle];\n"));
        }
        dot.push_str("}\n");
        dot
    }

    /// Write the dot serialization to `path`. Rendering the file with
    /// an external graph tool is left to the caller.
    pub fn save_diagram<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        fs::write(path, self.to_dot())
    }
}
