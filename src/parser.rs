// parser.rs

use itertools::Itertools;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum QuoteType { None, Single, Double }

impl QuoteType {
    fn of(ch: char) -> QuoteType {
        match ch {
            '\'' => QuoteType::Single,
            '"' => QuoteType::Double,
            _ => QuoteType::None,
        }
    }
}

/// One unit of a split command line. Quoted tokens keep their content
/// verbatim with the surrounding quotes removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub quote: QuoteType,
}

impl Token {
    pub fn bare(text: impl Into<String>) -> Self {
        Self { text: text.into(), quote: QuoteType::None }
    }

    pub fn quoted(text: impl Into<String>, quote: QuoteType) -> Self {
        Self { text: text.into(), quote }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_quoted(&self) -> bool {
        self.quote != QuoteType::None
    }

    /// Unquoted and starting with at least one hyphen. A quoted `"-x"` is
    /// plain text, never a flag.
    pub fn is_flag_like(&self) -> bool {
        !self.is_quoted() && self.text.starts_with('-')
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

/// Whitespace as command lines are written by the tools that relay them:
/// Unicode white space without NEL (U+0085), plus the byte order mark.
pub fn is_space(ch: char) -> bool {
    (ch.is_whitespace() && ch != '\u{85}') || ch == '\u{feff}'
}

/// Deletes every run of two or more whitespace characters, then turns the
/// remaining lone tabs and newlines into spaces.
pub fn normalize_whitespace(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    for (spaces, run) in &line.chars().group_by(|&c| is_space(c)) {
        if !spaces {
            out.extend(run);
            continue;
        }
        let run: Vec<char> = run.collect();
        if let [single] = run.as_slice() {
            out.push(match single {
                '\t' | '\n' => ' ',
                c => *c,
            });
        }
    }
    out
}

fn is_quote(ch: char) -> bool {
    ch == '"' || ch == '\''
}

/// Splits a raw command line into tokens.
///
/// An unquoted run stops at whitespace or at a quote character, so
/// `--name="a b"` yields `--name=` and `a b`. A quote with no closing partner
/// is dropped and scanning resumes right after it.
pub fn tokenize(line: &str) -> Vec<Token> {
    let normalized = normalize_whitespace(line);
    let mut tokens = Vec::new();
    let mut rest = normalized.as_str();
    while let Some(ch) = rest.chars().next() {
        match ch {
            c if is_space(c) => {
                rest = &rest[c.len_utf8()..];
            }
            '"' | '\'' => {
                let body = &rest[1..];
                match body.find(ch) {
                    Some(end) => {
                        tokens.push(Token::quoted(&body[..end], QuoteType::of(ch)));
                        rest = &body[end + 1..];
                    }
                    None => {
                        log::trace!("dropping unbalanced {} quote", ch);
                        rest = body;
                    }
                }
            }
            _ => {
                let end = rest
                    .find(|c: char| is_space(c) || is_quote(c))
                    .unwrap_or(rest.len());
                tokens.push(Token::bare(&rest[..end]));
                rest = &rest[end..];
            }
        }
    }
    for token in &tokens {
        log::trace!("token {:?} ({:?})", token.text, token.quote);
    }
    tokens
}
