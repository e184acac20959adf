//! Regular expressions over a literal alphabet, compiled into DFAs.
//!
//! A pattern goes through Thompson's construction ([`build`]) into an
//! [`Nfa`], which subset construction ([`to_dfa`]) turns into a [`Dfa`].
//! The DFA is read-only once built and can be queried with
//! [`Dfa::accepts`] any number of times.
//!
//! The accepted syntax is deliberately tiny: ASCII letters and digits are
//! literals, adjacency is concatenation, `|` is alternation, `(`/`)` group
//! and a postfix `*` is the Kleene star. Any other character is skipped.

pub mod dfa;
pub mod nfa;
pub mod thompson;

pub use crate::dfa::{to_dfa, Dfa};
pub use crate::nfa::{Nfa, NfaState};
pub use crate::thompson::build;
pub use regex_dfa_util::{StateId, StateSet};

/// Errors raised while turning a pattern into an automaton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The pattern reduced to no fragment at all, e.g. it was empty or held
    /// nothing but operators.
    InvalidRegex(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidRegex(regex) => write!(f, "invalid regex {regex:?}: nothing to match after reduction"),
        }
    }
}

impl std::error::Error for Error {}

/// Builds the Thompson NFA for `regex` and determinizes it.
pub fn compile(regex: &str) -> Result<Dfa, Error> {
    let nfa = build(regex)?;
    Ok(to_dfa(&nfa))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_reports_invalid_regex() {
        assert_eq!(compile(""), Err(Error::InvalidRegex(String::new())));
        assert!(matches!(compile("(|)*"), Err(Error::InvalidRegex(_))));
    }

    #[test]
    fn error_message_names_the_pattern() {
        let msg = compile("()").unwrap_err().to_string();
        assert!(msg.contains("\"()\""), "{msg}");
    }
}
