use super::Error;
use regex::Regex;
use std::ops::Range;

type Result<T> = std::result::Result<T, Error>;

type Transform<T> = Box<dyn Fn(&str) -> Option<T>>;

/// ## Ordered pattern scanner
///
/// At each position the rules are tried in the order they were added and
/// the first one matching a non-empty prefix wins. A rule's transform may
/// return `None` to drop what it matched.

pub struct Scanner<T> {
    rules: Vec<(Regex, Transform<T>)>,
}

impl<T> Default for Scanner<T> {
    fn default() -> Self {
        Scanner { rules: vec![] }
    }
}

impl<T> Scanner<T> {
    pub fn new() -> Scanner<T> {
        Scanner::default()
    }

    pub fn rule<F>(mut self, pattern: &str, transform: F) -> Result<Scanner<T>>
    where
        F: Fn(&str) -> Option<T> + 'static,
    {
        let anchored = match Regex::new(&format!("^(?:{})", pattern)) {
            Ok(regex) => regex,
            Err(e) => return Err(error!(InternalError; format!("BAD PATTERN {}: {}", pattern, e))),
        };
        self.rules.push((anchored, Box::new(transform)));
        Ok(self)
    }

    /// Rule whose matches are always dropped.
    pub fn skip(self, pattern: &str) -> Result<Scanner<T>> {
        self.rule(pattern, |_| None)
    }

    pub fn scan<'a>(&'a self, text: &'a str) -> Scan<'a, T> {
        Scan {
            scanner: self,
            text,
            pos: 0,
            failed: false,
        }
    }
}

/// Lazy token stream. Yields each token with its byte span and stops
/// after the first error.
pub struct Scan<'a, T> {
    scanner: &'a Scanner<T>,
    text: &'a str,
    pos: usize,
    failed: bool,
}

impl<'a, T> Iterator for Scan<'a, T> {
    type Item = Result<(T, Range<usize>)>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.failed && self.pos < self.text.len() {
            let rest = &self.text[self.pos..];
            let found = self.scanner.rules.iter().find_map(|(regex, transform)| {
                regex
                    .find(rest)
                    .filter(|m| !m.as_str().is_empty())
                    .map(|m| (m.end(), transform))
            });
            let (len, transform) = match found {
                Some(found) => found,
                None => {
                    self.failed = true;
                    return Some(Err(error!(SyntaxError, ..self.pos; "UNRECOGNIZED INPUT")));
                }
            };
            let span = self.pos..self.pos + len;
            self.pos = span.end;
            if let Some(token) = transform(&self.text[span.clone()]) {
                return Some(Ok((token, span)));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Tok {
        Word(String),
        Num(u32),
    }

    fn scanner() -> Scanner<Tok> {
        Scanner::new()
            .rule(r"[0-9]+", |m| m.parse().ok().map(Tok::Num))
            .unwrap()
            .rule(r"[a-z]+", |m| Some(Tok::Word(m.to_string())))
            .unwrap()
            .skip(r" +")
            .unwrap()
    }

    #[test]
    fn test_first_rule_wins() {
        let s = Scanner::new()
            .rule(r"ab", |_| Some(1))
            .unwrap()
            .rule(r"abc", |_| Some(2))
            .unwrap()
            .rule(r"c", |_| Some(3))
            .unwrap();
        let v: Vec<i32> = s.scan("abc").map(|r| r.unwrap().0).collect();
        assert_eq!(v, [1, 3]);
    }

    #[test]
    fn test_skip_and_spans() {
        let s = scanner();
        let v: Vec<_> = s.scan("ab 12").map(|r| r.unwrap()).collect();
        assert_eq!(v, [(Tok::Word("ab".into()), 0..2), (Tok::Num(12), 3..5)]);
    }

    #[test]
    fn test_no_rule_matches() {
        let s = scanner();
        let mut it = s.scan("ab ?x");
        assert!(it.next().unwrap().is_ok());
        let e = it.next().unwrap().unwrap_err();
        assert_eq!(e.offset(), Some(3));
        assert!(it.next().is_none());
    }

    #[test]
    fn test_empty_matches_are_ignored() {
        let s = Scanner::new()
            .rule(r"x*", |_| Some('x'))
            .unwrap()
            .rule(r".", |_| Some('.'))
            .unwrap();
        let v: Vec<char> = s.scan("yx").map(|r| r.unwrap().0).collect();
        assert_eq!(v, ['.', 'x']);
    }

    #[test]
    fn test_bad_pattern() {
        assert!(Scanner::<()>::new().rule(r"(", |_| None).is_err());
    }
}
