use std::fmt::{Display, Formatter};
use itertools::Itertools;
use regex_dfa_automata::Dfa;

const STATE_WIDTH: usize = 10;
const SYMBOL_WIDTH: usize = 8;
const ACCEPT_WIDTH: usize = 10;

fn rule(width: usize) -> String {
    "-".repeat(width)
}

/// The transition function of a DFA as a fixed-width table, one row per
/// state, with `->` in front of the start state and `-` wherever a state has
/// no successor on a symbol.
pub struct TransitionTable<'a>(pub &'a Dfa);

impl Display for TransitionTable<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let dfa = self.0;
        let symbols = dfa.symbols();
        let width = STATE_WIDTH + 3 + symbols.len() * (SYMBOL_WIDTH + 3) + ACCEPT_WIDTH + 3 + "NFA states".len();

        writeln!(f, "DFA Transition Table:")?;
        writeln!(f, "{}", rule(width))?;

        write!(f, "{:>STATE_WIDTH$} | ", "State")?;
        for c in &symbols {
            write!(f, "{c:>SYMBOL_WIDTH$} | ")?;
        }
        writeln!(f, "{:>ACCEPT_WIDTH$} | NFA states", "Accept")?;
        writeln!(f, "{}", rule(width))?;

        for (state, subset) in dfa.subsets().iter().enumerate() {
            let marker = if state == dfa.start() { "->" } else { "" };
            write!(f, "{marker:<3}{state:>w$} | ", w = STATE_WIDTH - 3)?;
            for &c in &symbols {
                match dfa.transition(state, c) {
                    Some(to) => write!(f, "{to:>SYMBOL_WIDTH$} | ")?,
                    None => write!(f, "{:>SYMBOL_WIDTH$} | ", "-")?,
                }
            }
            let accept = if dfa.is_accepting(state) { "YES" } else { "NO" };
            writeln!(f, "{accept:>ACCEPT_WIDTH$} | {subset}")?;
        }
        writeln!(f, "{}", rule(width))
    }
}

/// One line per input: the input right-aligned, then its verdict and any
/// notes (e.g. disagreements found by a cross-check).
pub fn verdict(input: &str, accepted: bool, notes: &[String]) -> String {
    let shown = if input.is_empty() { "\"\"" } else { input };
    let word = if accepted { "ACCEPTED" } else { "REJECTED" };
    if notes.is_empty() {
        format!("{shown:>10} : {word}")
    }
    else {
        format!("{shown:>10} : {word} ({})", notes.iter().join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex_dfa_automata::compile;

    #[test]
    fn table_has_a_row_per_state() {
        let dfa = compile("(a|b)*abb").unwrap();
        let table = TransitionTable(&dfa).to_string();
        let rows: Vec<&str> = table.lines().filter(|l| l.contains(" | {")).collect();
        assert_eq!(rows.len(), dfa.state_count());
        assert!(rows[0].starts_with("->"), "{table}");
        assert!(!rows[1].starts_with("->"), "{table}");
        assert_eq!(rows.iter().filter(|r| r.contains(" YES | ")).count(), 1, "{table}");
    }

    #[test]
    fn header_lists_symbols_in_order() {
        let table = TransitionTable(&compile("(b|a)c").unwrap()).to_string();
        let header = table.lines().nth(2).unwrap();
        let cells: Vec<&str> = header.split('|').map(str::trim).collect();
        assert_eq!(cells, vec!["State", "a", "b", "c", "Accept", "NFA states"]);
    }

    #[test]
    fn missing_transitions_show_a_dash() {
        let table = TransitionTable(&compile("ab").unwrap()).to_string();
        let last = table.lines().filter(|l| l.contains(" | {")).last().unwrap();
        let cells: Vec<&str> = last.split('|').map(str::trim).collect();
        assert_eq!(&cells[1..4], &["-", "-", "YES"]);
    }

    #[test]
    fn verdict_lines() {
        assert_eq!(verdict("1101", true, &[]), "      1101 : ACCEPTED");
        assert_eq!(verdict("", false, &[]), "        \"\" : REJECTED");
        assert_eq!(
            verdict("ab", false, &["NFA disagrees".to_string()]),
            "        ab : REJECTED (NFA disagrees)",
        );
    }
}
