use either::{Either, Left, Right};
use log::debug;
use nom::branch::alt;
use nom::character::complete::{anychar, char, satisfy};
use nom::combinator::{iterator, map, value};
use nom::IResult;
use regex_dfa_util::{is_literal, StateId};
use crate::nfa::Nfa;
use crate::Error;

type NResult<'a, T> = IResult<&'a str, T>;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Operator {
    Open,
    Close,
    Alternate,
    Star,
}

type Token = Either<char, Operator>;

/// A piece of the automaton under construction: where it is entered and
/// which of its states accept. The states themselves live in the builder.
#[derive(Debug, Clone)]
struct Fragment {
    start: StateId,
    accepting: Vec<StateId>,
}

fn operator(input: &str) -> NResult<Operator> {
    alt((
        value(Operator::Open, char('(')),
        value(Operator::Close, char(')')),
        value(Operator::Alternate, char('|')),
        value(Operator::Star, char('*')),
    ))(input)
}

fn token(input: &str) -> NResult<Option<Token>> {
    alt((
        map(satisfy(is_literal), |c| Some(Left(c))),
        map(operator, |op| Some(Right(op))),
        // Anything else is skipped
        value(None, anychar),
    ))(input)
}

/// Every character is consumed by some branch of `token`, so the iterator
/// only stops at the end of the input.
fn tokenize(regex: &str) -> Vec<Token> {
    let mut tokens = iterator(regex, token);
    (&mut tokens).flatten().collect()
}

/// The two topmost operands, earlier-pushed first, or `None` (leaving the
/// stack untouched) when there are fewer than two.
fn pop_pair(operands: &mut Vec<Fragment>) -> Option<(Fragment, Fragment)> {
    if operands.len() < 2 {
        return None;
    }
    let b = operands.pop()?;
    let a = operands.pop()?;
    Some((a, b))
}

/// Owns the one state arena every fragment is built into.
struct Builder {
    nfa: Nfa,
}

impl Builder {
    fn new() -> Self {
        Self { nfa: Nfa::new() }
    }

    fn literal(&mut self, c: char) -> Fragment {
        let start = self.nfa.add_state();
        let end = self.nfa.add_state();
        self.nfa.add_transition(start, c, end);
        Fragment { start, accepting: vec![end] }
    }

    fn concat(&mut self, a: Fragment, b: Fragment) -> Fragment {
        for s in a.accepting {
            self.nfa.add_epsilon(s, b.start);
        }
        Fragment { start: a.start, accepting: b.accepting }
    }

    fn alternate(&mut self, a: Fragment, b: Fragment) -> Fragment {
        let start = self.nfa.add_state();
        self.nfa.add_epsilon(start, a.start);
        self.nfa.add_epsilon(start, b.start);

        let end = self.nfa.add_state();
        for s in a.accepting.into_iter().chain(b.accepting) {
            self.nfa.add_epsilon(s, end);
        }
        Fragment { start, accepting: vec![end] }
    }

    fn star(&mut self, a: Fragment) -> Fragment {
        let start = self.nfa.add_state();
        let end = self.nfa.add_state();
        self.nfa.add_epsilon(start, a.start);
        // Zero repetitions
        self.nfa.add_epsilon(start, end);

        for s in a.accepting {
            self.nfa.add_epsilon(s, a.start);
            self.nfa.add_epsilon(s, end);
        }
        Fragment { start, accepting: vec![end] }
    }

    fn finish(mut self, fragment: Fragment) -> Nfa {
        self.nfa.set_start(fragment.start);
        for s in fragment.accepting {
            self.nfa.set_accepting(s);
        }
        self.nfa
    }

    /// Applies a pending `|` to the two topmost operands. With fewer than two
    /// operands the operator has nothing to join and is dropped.
    fn apply(&mut self, op: Operator, operands: &mut Vec<Fragment>) {
        debug_assert_eq!(op, Operator::Alternate);
        if let Some((a, b)) = pop_pair(operands) {
            let alt = self.alternate(a, b);
            operands.push(alt);
        }
    }

    /// Pops and applies operators down to (not including) the nearest `(`.
    fn flush(&mut self, operators: &mut Vec<Operator>, operands: &mut Vec<Fragment>) {
        while let Some(&op) = operators.last() {
            if op == Operator::Open {
                break;
            }
            operators.pop();
            self.apply(op, operands);
        }
    }
}

/// Builds the Thompson NFA for `regex`.
///
/// Literal fragments go on an operand stack and `(`/`|` on an operator stack.
/// A `*` wraps whatever fragment is on top of the operand stack. A `)` only
/// reduces the alternations pending inside its group, so `(a|b)*` repeats the
/// whole group while in `(ab)*` only `b` is starred. Whatever is left after
/// the scan is joined by concatenation in the order it was pushed.
pub fn build(regex: &str) -> Result<Nfa, Error> {
    let mut builder = Builder::new();
    let mut operands: Vec<Fragment> = Vec::new();
    let mut operators: Vec<Operator> = Vec::new();

    for t in tokenize(regex) {
        match t {
            Left(c) => {
                let f = builder.literal(c);
                operands.push(f);
            }
            Right(Operator::Open) => {
                operators.push(Operator::Open);
            }
            Right(Operator::Close) => {
                builder.flush(&mut operators, &mut operands);
                if operators.last() == Some(&Operator::Open) {
                    operators.pop();
                }
            }
            Right(Operator::Alternate) => {
                builder.flush(&mut operators, &mut operands);
                operators.push(Operator::Alternate);
            }
            Right(Operator::Star) => {
                if let Some(f) = operands.pop() {
                    let starred = builder.star(f);
                    operands.push(starred);
                }
            }
        }
    }

    // Unclosed groups just go away here
    while let Some(op) = operators.pop() {
        if op != Operator::Open {
            builder.apply(op, &mut operands);
        }
    }

    while let Some((a, b)) = pop_pair(&mut operands) {
        let joined = builder.concat(a, b);
        operands.push(joined);
    }

    let Some(fragment) = operands.pop() else {
        return Err(Error::InvalidRegex(regex.to_string()));
    };
    let nfa = builder.finish(fragment);

    debug!("built NFA for {regex:?}: {} states, alphabet {:?}", nfa.len(), nfa.alphabet());
    Ok(nfa)
}
