use super::{scan::Scanner, token::*, Error};
use std::ops::Range;

type Result<T> = std::result::Result<T, Error>;

pub fn scanner() -> Result<Scanner<Token>> {
    Scanner::new()
        // 18 digits always fit; longer runs split into several integers
        .rule(r"[0-9]{1,18}", |m| m.parse().ok().map(Token::Integer))?
        .rule(r#""[^"]*""#, |m| Some(Token::String(m[1..m.len() - 1].into())))?
        .rule(r"(\n+|:)\n", |m| {
            if m.starts_with(':') {
                Some(Token::Join)
            } else {
                Some(Token::Newline)
            }
        })?
        .rule(r"\n", |_| Some(Token::Newline))?
        .skip(r"[^\S\n]+")?
        .rule(r".", |m| m.chars().next().map(Token::Char))
}

/// Scans normalized program text into tokens and their byte spans.
pub fn lex(text: &str) -> Result<(Vec<Token>, Vec<Range<usize>>)> {
    tokenize(&scanner()?, text)
}

pub fn tokenize(scanner: &Scanner<Token>, text: &str) -> Result<(Vec<Token>, Vec<Range<usize>>)> {
    let mut tokens = vec![];
    let mut spans = vec![];
    for item in scanner.scan(text) {
        let (token, span) = item?;
        tokens.push(token);
        spans.push(span);
    }
    Ok((tokens, spans))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(s: &str) -> Vec<Token> {
        lex(s).unwrap().0
    }

    #[test]
    fn test_keywords_are_characters() {
        assert_eq!(
            tokens("10END"),
            [
                Token::Integer(10),
                Token::Char('E'),
                Token::Char('N'),
                Token::Char('D')
            ]
        );
    }

    #[test]
    fn test_string_keeps_interior() {
        assert_eq!(
            tokens("\" A;B \"1"),
            [Token::String(" A;B ".into()), Token::Integer(1)]
        );
    }

    #[test]
    fn test_newline_runs_collapse() {
        assert_eq!(tokens("1\n\n\n2"), [Token::Integer(1), Token::Newline, Token::Integer(2)]);
        assert_eq!(tokens("1:\n2"), [Token::Integer(1), Token::Join, Token::Integer(2)]);
        assert_eq!(tokens("1:2"), [Token::Integer(1), Token::Char(':'), Token::Integer(2)]);
    }

    #[test]
    fn test_whitespace_dropped() {
        assert_eq!(tokens(" 1 \t+\r2 "), [Token::Integer(1), Token::Char('+'), Token::Integer(2)]);
    }

    #[test]
    fn test_unterminated_string_is_a_char() {
        assert_eq!(tokens("\"1"), [Token::Char('"'), Token::Integer(1)]);
    }

    #[test]
    fn test_spans() {
        let (_, spans) = lex("10 \"AB\"\n").unwrap();
        assert_eq!(spans, [0..2, 3..7, 7..8]);
    }

    #[test]
    fn test_long_numbers_split() {
        assert_eq!(
            tokens("1234567890123456789"),
            [Token::Integer(123456789012345678), Token::Integer(9)]
        );
    }

    #[test]
    fn test_only_ascii_digits() {
        assert_eq!(
            tokens("1\u{663}2"),
            [Token::Integer(1), Token::Char('\u{663}'), Token::Integer(2)]
        );
    }
}
