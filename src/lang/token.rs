use std::rc::Rc;

#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    Integer(i64),
    String(Rc<str>),
    /// A colon that ended its source line; the statement list continues
    /// on the next line.
    Join,
    Newline,
    Char(char),
}

impl Token {
    pub fn is_integer(&self) -> bool {
        matches!(self, Token::Integer(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Token::String(_))
    }

    pub fn is_operator(&self) -> bool {
        matches!(self, Token::Char('+') | Token::Char('-') | Token::Char('*') | Token::Char('/'))
    }

    pub fn is_separator(&self) -> bool {
        matches!(self, Token::Join | Token::Char(':'))
    }

    pub fn is_remark(&self) -> bool {
        *self != Token::Newline
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Token::*;
        match self {
            Integer(n) => write!(f, "{}", n),
            String(s) => write!(f, "\"{}\"", s),
            Join => write!(f, ":"),
            Newline => writeln!(f),
            Char(ch) => write!(f, "{}", ch),
        }
    }
}
