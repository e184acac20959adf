use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt::{Debug, Formatter};
use derive_getters::Getters;
use itertools::Itertools;
use regex_dfa_util::{StateId, StateSet};

#[derive(Default, Clone, PartialEq, Eq, Getters)]
pub struct NfaState {
    transitions: BTreeMap<char, StateSet>,
    epsilons: StateSet,
    #[getter(skip)]
    accepting: bool,
}

impl NfaState {
    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    /// Destinations reached by consuming `symbol`, if any.
    pub fn on(&self, symbol: char) -> Option<&StateSet> {
        self.transitions.get(&symbol)
    }
}

impl Debug for NfaState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (symbol, targets) in &self.transitions {
            writeln!(f, "    {symbol:?} -> {targets}")?;
        }
        if !self.epsilons.is_empty() {
            writeln!(f, "    Empty -> {}", self.epsilons)?;
        }

        Ok(())
    }
}

/// A nondeterministic automaton with epsilon edges.
///
/// States live in one arena indexed by [`StateId`], so every edge target is
/// a valid handle and handles stay contiguous from zero. The accept set and
/// the per-state accepting flags are only ever changed together.
#[derive(Clone, PartialEq, Eq, Getters)]
pub struct Nfa {
    states: Vec<NfaState>,
    #[getter(skip)]
    start: StateId,
    accepting: StateSet,
    alphabet: BTreeSet<char>,
}

impl Nfa {
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            start: StateId::new(0),
            accepting: StateSet::new(),
            alphabet: BTreeSet::new(),
        }
    }

    pub fn add_state(&mut self) -> StateId {
        let id = StateId::new(self.states.len());
        self.states.push(NfaState::default());
        id
    }

    pub fn add_transition(&mut self, from: StateId, symbol: char, to: StateId) {
        debug_assert!(to.index() < self.states.len());
        self.states[from.index()].transitions.entry(symbol).or_default().insert(to);
        self.alphabet.insert(symbol);
    }

    pub fn add_epsilon(&mut self, from: StateId, to: StateId) {
        debug_assert!(to.index() < self.states.len());
        self.states[from.index()].epsilons.insert(to);
    }

    pub fn set_accepting(&mut self, id: StateId) {
        self.states[id.index()].accepting = true;
        self.accepting.insert(id);
    }

    pub fn set_start(&mut self, id: StateId) {
        debug_assert!(id.index() < self.states.len());
        self.start = id;
    }

    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn state(&self, id: StateId) -> &NfaState {
        &self.states[id.index()]
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn is_accepting_set(&self, set: &StateSet) -> bool {
        set.intersects(&self.accepting)
    }

    /// Every state reachable from `seed` through epsilon edges alone,
    /// `seed` included.
    pub fn epsilon_closure(&self, seed: &StateSet) -> StateSet {
        let mut closure = seed.clone();
        let mut queue: VecDeque<StateId> = seed.iter().copied().collect();

        while let Some(id) = queue.pop_front() {
            for &next in self.state(id).epsilons() {
                if closure.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        closure
    }

    /// Union of the `symbol` destinations of every state in `from`.
    pub fn move_on(&self, from: &StateSet, symbol: char) -> StateSet {
        from.iter()
            .filter_map(|&id| self.state(id).on(symbol))
            .flat_map(|targets| targets.iter().copied())
            .collect()
    }

    /// Runs the automaton directly, tracking every live state at once.
    pub fn accepts(&self, input: &str) -> bool {
        if self.is_empty() {
            return false;
        }

        let mut current = self.epsilon_closure(&StateSet::singleton(self.start));
        for c in input.chars() {
            if current.is_empty() {
                return false;
            }
            current = self.epsilon_closure(&self.move_on(&current, c));
        }
        self.is_accepting_set(&current)
    }
}

impl Default for Nfa {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Nfa {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "start: {}", self.start)?;
        writeln!(f, "accept: {}", self.accepting)?;
        writeln!(f, "alphabet: {{{}}}", self.alphabet.iter().join(", "))?;
        for (i, s) in self.states.iter().enumerate() {
            if s.accepting {
                writeln!(f, "{i} (accept):")?;
            }
            else {
                writeln!(f, "{i}:")?;
            }
            write!(f, "{s:?}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(ids: &[usize]) -> StateSet {
        ids.iter().copied().map(StateId::new).collect()
    }

    // 0 -a-> 1 -e-> 2 -e-> 3, 3 -e-> 1, 2 -b-> 0, 3 accepts
    fn sample() -> Nfa {
        let mut nfa = Nfa::new();
        let s: Vec<StateId> = (0..4).map(|_| nfa.add_state()).collect();
        nfa.add_transition(s[0], 'a', s[1]);
        nfa.add_epsilon(s[1], s[2]);
        nfa.add_epsilon(s[2], s[3]);
        nfa.add_epsilon(s[3], s[1]);
        nfa.add_transition(s[2], 'b', s[0]);
        nfa.set_start(s[0]);
        nfa.set_accepting(s[3]);
        nfa
    }

    #[test]
    fn handles_are_dense() {
        let mut nfa = Nfa::new();
        assert_eq!(nfa.add_state(), StateId::new(0));
        assert_eq!(nfa.add_state(), StateId::new(1));
        assert_eq!(nfa.len(), 2);
    }

    #[test]
    fn accepting_flag_tracks_accept_set() {
        let nfa = sample();
        assert_eq!(nfa.accepting(), &ids(&[3]));
        assert!(nfa.state(StateId::new(3)).is_accepting());
        assert!(!nfa.state(StateId::new(2)).is_accepting());
    }

    #[test]
    fn alphabet_is_recorded() {
        let nfa = sample();
        assert_eq!(nfa.alphabet().iter().collect::<String>(), "ab");
    }

    #[test]
    fn closure_follows_cycles() {
        let nfa = sample();
        assert_eq!(nfa.epsilon_closure(&ids(&[1])), ids(&[1, 2, 3]));
        assert_eq!(nfa.epsilon_closure(&ids(&[0])), ids(&[0]));
        assert_eq!(nfa.epsilon_closure(&StateSet::new()), StateSet::new());
    }

    #[test]
    fn move_unions_targets() {
        let nfa = sample();
        assert_eq!(nfa.move_on(&ids(&[0, 1, 2]), 'a'), ids(&[1]));
        assert_eq!(nfa.move_on(&ids(&[0, 2]), 'b'), ids(&[0]));
        assert_eq!(nfa.move_on(&ids(&[1, 3]), 'a'), StateSet::new());
    }

    #[test]
    fn simulation() {
        let nfa = sample();
        assert!(nfa.accepts("a"));
        assert!(nfa.accepts("aba"));
        assert!(!nfa.accepts(""));
        assert!(!nfa.accepts("ab"));
        assert!(!nfa.accepts("ac"));
    }

    #[test]
    fn debug_lists_edges() {
        let out = format!("{:?}", sample());
        assert!(out.contains("3 (accept):"), "{out}");
        assert!(out.contains("'a' -> {1}"), "{out}");
        assert!(out.contains("Empty -> {2}"), "{out}");
    }
}
