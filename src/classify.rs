// classify.rs

use std::collections::BTreeMap;

use crate::command::FlagValue;
use crate::parser::Token;

/// Classification rules, in the order they are tried.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Rule {
    /// `-f value`, or `-f` alone when followed by a flag or nothing.
    ShortFlag,
    /// `--flag=` with the value in the next token.
    LongFlagNextValue,
    /// `--flag=value`.
    LongFlagInline,
    /// `--flag` followed by another flag or nothing.
    LongSwitch,
    Positional,
}

impl Rule {
    pub fn select(current: &Token, next: Option<&Token>) -> Rule {
        if current.is_quoted() {
            return Rule::Positional;
        }
        let text = current.as_str();
        if let Some(rest) = text.strip_prefix('-') {
            if rest.chars().next().is_some_and(|c| c != '-') {
                return Rule::ShortFlag;
            }
        }
        if let Some(rest) = text.strip_prefix("--") {
            if rest.ends_with('=') {
                return Rule::LongFlagNextValue;
            }
            if rest.contains('=') {
                return Rule::LongFlagInline;
            }
            // `--flag value` is not a flag at all; the token stays positional.
            if next.map_or(true, Token::is_flag_like) {
                return Rule::LongSwitch;
            }
        }
        Rule::Positional
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Flag(String, FlagValue),
    Positional(String),
}

/// One classification decision and how many tokens it used.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    pub rule: Rule,
    pub consumed: usize,
    pub outcome: Outcome,
}

/// Walks a token slice left to right, yielding one [`Step`] per decision.
pub struct Steps<'a> {
    tokens: &'a [Token],
    cursor: usize,
}

impl<'a> Steps<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, cursor: 0 }
    }
}

impl<'a> Iterator for Steps<'a> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        let current = self.tokens.get(self.cursor)?;
        let next = self.tokens.get(self.cursor + 1);
        let rule = Rule::select(current, next);
        let text = current.as_str();
        let (consumed, outcome) = match rule {
            Rule::ShortFlag => {
                let name = text.replacen('-', "", 1);
                match next {
                    Some(value) if !value.is_flag_like() => {
                        (2, Outcome::Flag(name, FlagValue::Value(value.text.clone())))
                    }
                    _ => (1, Outcome::Flag(name, FlagValue::Switch)),
                }
            }
            Rule::LongFlagNextValue => {
                let name = text[2..text.len() - 1].to_string();
                match next {
                    Some(value) => (2, Outcome::Flag(name, FlagValue::Value(value.text.replace('"', "")))),
                    None => (1, Outcome::Flag(name, FlagValue::Value(String::new()))),
                }
            }
            Rule::LongFlagInline => {
                let (name, value) = text[2..].split_once('=').unwrap_or((&text[2..], ""));
                (1, Outcome::Flag(name.to_string(), FlagValue::Value(value.to_string())))
            }
            Rule::LongSwitch => (1, Outcome::Flag(text[2..].to_string(), FlagValue::Switch)),
            Rule::Positional => (1, Outcome::Positional(current.text.clone())),
        };
        log::trace!("{:?} consumed {} token(s) at {}", rule, consumed, self.cursor);
        self.cursor += consumed;
        Some(Step { rule, consumed, outcome })
    }
}

/// Folds the token sequence following the command name into a flag map and
/// an ordered positional list. A repeated flag keeps its last value.
pub fn classify(tokens: &[Token]) -> (BTreeMap<String, FlagValue>, Vec<String>) {
    let mut flags = BTreeMap::new();
    let mut positionals = Vec::new();
    for step in Steps::new(tokens) {
        match step.outcome {
            Outcome::Flag(name, value) => {
                if let Some(previous) = flags.insert(name, value) {
                    log::debug!("flag overwritten, previous value {:?}", previous);
                }
            }
            Outcome::Positional(arg) => positionals.push(arg),
        }
    }
    (flags, positionals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tokenize;

    fn run(line: &str) -> (BTreeMap<String, FlagValue>, Vec<String>) {
        classify(&tokenize(line))
    }

    fn value(v: &str) -> FlagValue {
        FlagValue::Value(v.to_string())
    }

    fn rules(line: &str) -> Vec<Rule> {
        let tokens = tokenize(line);
        Steps::new(&tokens).map(|s| s.rule).collect()
    }

    #[test]
    fn short_flag_takes_next_token() {
        let (flags, positionals) = run("-o out.txt");
        assert_eq!(flags["o"], value("out.txt"));
        assert!(positionals.is_empty());
    }

    #[test]
    fn short_flag_before_flag_is_switch() {
        let (flags, _) = run("-v -o out.txt");
        assert_eq!(flags["v"], FlagValue::Switch);
        assert_eq!(flags["o"], value("out.txt"));
    }

    #[test]
    fn short_flag_at_end_is_switch() {
        let (flags, positionals) = run("file -v");
        assert_eq!(flags["v"], FlagValue::Switch);
        assert_eq!(positionals, vec!["file"]);
    }

    #[test]
    fn short_flag_strips_one_hyphen_only() {
        let (flags, _) = run("-a-b");
        assert_eq!(flags["a-b"], FlagValue::Switch);
    }

    #[test]
    fn combined_short_flags_are_one_name() {
        let (flags, _) = run("-abc");
        assert_eq!(flags.len(), 1);
        assert_eq!(flags["abc"], FlagValue::Switch);
    }

    #[test]
    fn short_flag_takes_quoted_value() {
        let (flags, _) = run(r#"-m "fix the build""#);
        assert_eq!(flags["m"], value("fix the build"));
    }

    #[test]
    fn quoted_hyphen_token_is_a_value() {
        let (flags, positionals) = run(r#"-n "-5""#);
        assert_eq!(flags["n"], value("-5"));
        assert!(positionals.is_empty());
    }

    #[test]
    fn long_flag_with_value_in_next_token() {
        let (flags, positionals) = run(r#"--message="two words" rest"#);
        assert_eq!(flags["message"], value("two words"));
        assert_eq!(positionals, vec!["rest"]);
    }

    #[test]
    fn long_flag_next_value_strips_every_double_quote() {
        let (flags, _) = run(r#"--msg= 'say "hi"'"#);
        assert_eq!(flags["msg"], value("say hi"));
    }

    #[test]
    fn long_flag_next_value_consumes_flag_like_token() {
        let (flags, _) = run("--level= -3");
        assert_eq!(flags["level"], value("-3"));
    }

    #[test]
    fn dangling_long_flag_next_value_is_empty() {
        let (flags, _) = run("x --name=");
        assert_eq!(flags["name"], value(""));
    }

    #[test]
    fn long_flag_inline_value() {
        let (flags, _) = run("--mode=fast");
        assert_eq!(flags["mode"], value("fast"));
    }

    #[test]
    fn long_flag_inline_value_keeps_later_equals() {
        let (flags, _) = run("--define=KEY=VALUE");
        assert_eq!(flags["define"], value("KEY=VALUE"));
    }

    #[test]
    fn long_switch_at_end_or_before_flag() {
        let (flags, positionals) = run("build --watch");
        assert_eq!(flags["watch"], FlagValue::Switch);
        assert_eq!(positionals, vec!["build"]);

        let (flags, _) = run("--verbose --color=auto");
        assert_eq!(flags["verbose"], FlagValue::Switch);
        assert_eq!(flags["color"], value("auto"));
    }

    #[test]
    fn long_flag_before_plain_word_falls_through() {
        let (flags, positionals) = run("--output file.txt");
        assert!(flags.is_empty());
        assert_eq!(positionals, vec!["--output", "file.txt"]);
    }

    #[test]
    fn bare_hyphens_are_positional_or_empty_switch() {
        let (flags, positionals) = run("- x");
        assert!(flags.is_empty());
        assert_eq!(positionals, vec!["-", "x"]);

        let (flags, _) = run("--");
        assert_eq!(flags[""], FlagValue::Switch);
    }

    #[test]
    fn repeated_flag_overwrites() {
        let (flags, _) = run("-o a -o b");
        assert_eq!(flags.len(), 1);
        assert_eq!(flags["o"], value("b"));
    }

    #[test]
    fn positionals_keep_order() {
        let (_, positionals) = run("a -f x b c");
        assert_eq!(positionals, vec!["a", "b", "c"]);
    }

    #[test]
    fn rule_priority() {
        assert_eq!(
            rules("-s v --a= q --b=c --d e"),
            vec![
                Rule::ShortFlag,
                Rule::LongFlagNextValue,
                Rule::LongFlagInline,
                Rule::Positional,
                Rule::Positional,
            ]
        );
    }

    #[test]
    fn every_token_is_consumed_once() {
        for line in [
            "a -b c --d=e --f= g --h -i",
            r#"x "y z" -p 'q r' --s --t u"#,
            "--only",
            "- -- --= -=",
        ] {
            let tokens = tokenize(line);
            let consumed: usize = Steps::new(&tokens).map(|s| s.consumed).sum();
            assert_eq!(consumed, tokens.len(), "line {:?}", line);
        }
    }

    #[test]
    fn no_tokens_no_output() {
        let (flags, positionals) = classify(&[]);
        assert!(flags.is_empty());
        assert!(positionals.is_empty());
    }
}
