use lexopt::prelude::*;

pub const USAGE: &str = "\
Compile a regular expression into a DFA and test strings against it.

USAGE:
    regex_dfa [OPTIONS]
    regex_dfa [OPTIONS] <regex> [<input> ...]

With no regex, the built-in demo patterns are compiled and printed.

Patterns are made of ASCII letters and digits, concatenation by adjacency,
'|', '(' ')' and a postfix '*'. Every other character is ignored.
A '|' joins only the single fragments on either side of it, so 'ab|c'
reads as a(b|c); --check reports wherever that differs from the regex
crate.

OPTIONS:
    --nfa       Print the Thompson NFA and check every verdict against a
                direct simulation of it.
    --check     Check every verdict against the regex crate.
    -h, --help  Print this help.
";

#[derive(Debug, Default)]
pub struct Args {
    pub regex: Option<String>,
    pub inputs: Vec<String>,
    pub show_nfa: bool,
    pub check: bool,
    pub help: bool,
}

impl Args {
    pub fn parse(p: &mut lexopt::Parser) -> anyhow::Result<Args> {
        let mut args = Args::default();
        while let Some(arg) = p.next()? {
            match arg {
                Short('h') | Long("help") => {
                    args.help = true;
                }
                Long("nfa") => {
                    args.show_nfa = true;
                }
                Long("check") => {
                    args.check = true;
                }
                Value(v) => {
                    let v = v.string()?;
                    if args.regex.is_none() {
                        args.regex = Some(v);
                    }
                    else {
                        args.inputs.push(v);
                    }
                }
                _ => return Err(arg.unexpected().into()),
            }
        }
        Ok(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> anyhow::Result<Args> {
        Args::parse(&mut lexopt::Parser::from_args(argv.iter().copied()))
    }

    #[test]
    fn no_arguments_means_demo() {
        let args = parse(&[]).unwrap();
        assert!(args.regex.is_none());
        assert!(args.inputs.is_empty());
    }

    #[test]
    fn regex_then_inputs() {
        let args = parse(&["--check", "(a|b)*abb", "abb", "--nfa", "ab"]).unwrap();
        assert_eq!(args.regex.as_deref(), Some("(a|b)*abb"));
        assert_eq!(args.inputs, vec!["abb", "ab"]);
        assert!(args.check);
        assert!(args.show_nfa);
    }

    #[test]
    fn empty_input_after_separator() {
        let args = parse(&["a*", "--", ""]).unwrap();
        assert_eq!(args.inputs, vec![""]);
    }

    #[test]
    fn unknown_flag_is_an_error() {
        assert!(parse(&["--minimize"]).is_err());
    }
}
