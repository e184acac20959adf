use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::fmt::{Debug, Formatter};
use derive_getters::Getters;
use itertools::Itertools;
use log::{debug, trace};
use regex_dfa_util::StateSet;
use crate::nfa::Nfa;

/// A deterministic automaton produced by subset construction.
///
/// State `i` stands for the NFA subset `subsets[i]`. The transition function
/// is partial: a missing entry means the input is rejected, there is no
/// explicit dead state. Nothing about the DFA changes after construction.
#[derive(Clone, PartialEq, Eq, Getters)]
pub struct Dfa {
    subsets: Vec<StateSet>,
    #[getter(skip)]
    transitions: Vec<BTreeMap<char, usize>>,
    accepting: BTreeSet<usize>,
    alphabet: BTreeSet<char>,
}

impl Dfa {
    /// Always 0: the closure of the NFA start is the first subset discovered.
    pub fn start(&self) -> usize {
        0
    }

    /// The alphabet in the order tables are laid out in.
    pub fn symbols(&self) -> Vec<char> {
        self.alphabet.iter().copied().collect_vec()
    }

    pub fn state_count(&self) -> usize {
        self.subsets.len()
    }

    pub fn is_accepting(&self, state: usize) -> bool {
        self.accepting.contains(&state)
    }

    /// The NFA states `state` stands for, or `None` for an unknown state.
    pub fn subset(&self, state: usize) -> Option<&StateSet> {
        self.subsets.get(state)
    }

    pub fn transition(&self, state: usize, symbol: char) -> Option<usize> {
        self.transitions.get(state)?.get(&symbol).copied()
    }

    /// The outgoing edges of `state`, in symbol order. An unknown state has
    /// none.
    pub fn transitions_from(&self, state: usize) -> impl Iterator<Item = (char, usize)> + '_ {
        self.transitions.get(state).into_iter().flatten().map(|(&c, &to)| (c, to))
    }

    /// Walks the DFA over `input`. A symbol outside the alphabet or a missing
    /// transition rejects immediately.
    pub fn accepts(&self, input: &str) -> bool {
        let mut s = self.start();
        for c in input.chars() {
            if !self.alphabet.contains(&c) {
                return false;
            }
            match self.transition(s, c) {
                Some(next) => s = next,
                None => return false,
            }
        }
        self.is_accepting(s)
    }
}

impl Debug for Dfa {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, subset) in self.subsets.iter().enumerate() {
            let marker = if self.is_accepting(i) { " (accept)" } else { "" };
            writeln!(f, "{i}{marker} = {subset}:")?;
            for (c, to) in self.transitions_from(i) {
                writeln!(f, "    {c:?} -> {to}")?;
            }
        }

        Ok(())
    }
}

/// Determinizes `nfa` by subset construction.
///
/// Subsets are discovered breadth first and numbered in discovery order,
/// trying symbols in ascending order, so the same NFA always yields the same
/// table.
pub fn to_dfa(nfa: &Nfa) -> Dfa {
    let mut dfa = Dfa {
        subsets: Vec::new(),
        transitions: Vec::new(),
        accepting: BTreeSet::new(),
        alphabet: nfa.alphabet().clone(),
    };
    let mut ids: HashMap<StateSet, usize> = HashMap::new();
    let mut unmarked: VecDeque<usize> = VecDeque::new();

    let start = nfa.epsilon_closure(&StateSet::singleton(nfa.start()));
    unmarked.push_back(add_state(&mut dfa, &mut ids, nfa, start));

    while let Some(current) = unmarked.pop_front() {
        for &symbol in nfa.alphabet() {
            let next = nfa.epsilon_closure(&nfa.move_on(&dfa.subsets[current], symbol));
            if next.is_empty() {
                continue;
            }

            let to = match ids.get(&next) {
                Some(&id) => id,
                None => {
                    let id = add_state(&mut dfa, &mut ids, nfa, next);
                    unmarked.push_back(id);
                    id
                }
            };
            dfa.transitions[current].insert(symbol, to);
        }
    }

    debug!(
        "determinized {} NFA states into {} DFA states ({} accepting)",
        nfa.len(),
        dfa.state_count(),
        dfa.accepting.len(),
    );
    dfa
}

fn add_state(dfa: &mut Dfa, ids: &mut HashMap<StateSet, usize>, nfa: &Nfa, subset: StateSet) -> usize {
    let id = dfa.subsets.len();
    if nfa.is_accepting_set(&subset) {
        dfa.accepting.insert(id);
    }
    trace!("DFA state {id} = {subset}");

    ids.insert(subset.clone(), id);
    dfa.subsets.push(subset);
    dfa.transitions.push(BTreeMap::new());
    id
}
