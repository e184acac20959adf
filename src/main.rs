use std::io::Write;
use anyhow::Context;
use log::warn;
use regex::Regex;
use regex_dfa_automata::{build, to_dfa, Dfa, Nfa};
use regex_dfa_util::is_literal;
use crate::args::{Args, USAGE};
use crate::table::{verdict, TransitionTable};

mod args;
mod table;

const DEMO_PATTERNS: [&str; 4] = [
    "(a|b)*abb",
    "a*b*",
    "(a|b)*",
    "a(a|b)*b",
];

const BINARY_PATTERN: &str = "(0|1)*1(0|1)(0|1)";
const BINARY_INPUTS: [&str; 3] = ["1101", "111", "0001"];
const BINARY_MORE_INPUTS: [&str; 6] = ["100", "1000", "101", "010", "1111", "00100"];

fn main() -> anyhow::Result<()> {
    env_logger::init();
    if let Err(err) = run(&mut lexopt::Parser::from_env()) {
        if std::env::var("RUST_BACKTRACE").map_or(false, |v| v == "1") {
            writeln!(&mut std::io::stderr(), "{:?}", err)?;
        } else {
            writeln!(&mut std::io::stderr(), "{:#}", err)?;
        }
        std::process::exit(1);
    }
    Ok(())
}

fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let args = Args::parse(p)?;
    let mut out = std::io::stdout().lock();
    if args.help {
        write!(out, "{USAGE}")?;
        return Ok(());
    }

    match &args.regex {
        Some(regex) => {
            let inputs: Vec<&str> = args.inputs.iter().map(String::as_str).collect();
            let checker = Checker::new(regex, &args)?;
            writeln!(out, "Regular Expression: {regex}")?;
            print_table(&mut out, &checker, &args)?;
            print_verdicts(&mut out, &checker, "String Validation Results:", &inputs)?;
        }
        None => demo(&mut out, &args)?,
    }
    Ok(())
}

/// The table-only demos first, then the binary pattern with its validation
/// runs.
fn demo(out: &mut impl Write, args: &Args) -> anyhow::Result<()> {
    for regex in DEMO_PATTERNS {
        let checker = Checker::new(regex, args)?;
        writeln!(out, "Input Regular Expression: {regex}")?;
        print_table(out, &checker, args)?;
        writeln!(out)?;
    }

    let checker = Checker::new(BINARY_PATTERN, args)?;
    writeln!(out, "Regular Expression: {BINARY_PATTERN}")?;
    writeln!(out, "Description: Binary strings with '1' at third position from the end")?;
    print_table(out, &checker, args)?;
    print_verdicts(out, &checker, "String Validation Results:", &BINARY_INPUTS)?;
    print_verdicts(out, &checker, "Additional Test Cases:", &BINARY_MORE_INPUTS)?;
    Ok(())
}

fn print_table(out: &mut impl Write, checker: &Checker, args: &Args) -> anyhow::Result<()> {
    if args.show_nfa {
        writeln!(out, "\nThompson NFA:\n{:?}", checker.nfa)?;
    }
    write!(out, "\n{}", TransitionTable(&checker.dfa))?;
    Ok(())
}

fn print_verdicts(out: &mut impl Write, checker: &Checker, title: &str, inputs: &[&str]) -> anyhow::Result<()> {
    if inputs.is_empty() {
        return Ok(());
    }
    writeln!(out, "\n{title}")?;
    writeln!(out, "{}", "-".repeat(30))?;
    for input in inputs {
        let (accepted, notes) = checker.run(input);
        writeln!(out, "{}", verdict(input, accepted, &notes))?;
    }
    writeln!(out, "{}", "-".repeat(30))?;
    Ok(())
}

/// A compiled pattern plus whatever it should be cross-checked against.
struct Checker {
    nfa: Nfa,
    dfa: Dfa,
    simulate: bool,
    oracle: Option<Regex>,
}

impl Checker {
    fn new(regex: &str, args: &Args) -> anyhow::Result<Checker> {
        let nfa = build(regex).with_context(|| format!("failed to compile {regex:?}"))?;
        let dfa = to_dfa(&nfa);

        let oracle = if args.check {
            // Hand the regex crate only what our scanner actually reads
            let scanned: String = regex.chars().filter(|&c| is_literal(c) || "()|*".contains(c)).collect();
            match Regex::new(&format!("^(?:{scanned})$")) {
                Ok(re) => Some(re),
                Err(err) => {
                    warn!("not cross-checking {regex:?}, the regex crate rejects it: {err}");
                    None
                }
            }
        }
        else {
            None
        };

        Ok(Checker { nfa, dfa, simulate: args.show_nfa, oracle })
    }

    fn run(&self, input: &str) -> (bool, Vec<String>) {
        let accepted = self.dfa.accepts(input);
        let mut notes = Vec::new();
        if self.simulate && self.nfa.accepts(input) != accepted {
            warn!("DFA and NFA disagree on {input:?}");
            notes.push("NFA disagrees".to_string());
        }
        if let Some(re) = &self.oracle {
            if re.is_match(input) != accepted {
                notes.push("regex crate disagrees".to_string());
            }
        }
        (accepted, notes)
    }
}
