use std::rc::Rc;

/// One numbered line. The number is an expression evaluated anew at
/// every dispatch step.
#[derive(Debug, PartialEq, Clone)]
pub struct Line {
    pub number: Expression,
    pub commands: Vec<Command>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Command {
    Rem,
    Let(Expression, Expression),
    Print(Expression, bool),
    Input(Expression),
    Get(Expression),
    Put(Expression),
    End,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Integer(i64),
    String(Rc<str>),
    Binary(Operator, Box<Expression>, Box<Expression>),
}

impl Operator {
    pub fn from_char(ch: char) -> Option<Operator> {
        use Operator::*;
        match ch {
            '+' => Some(Add),
            '-' => Some(Subtract),
            '*' => Some(Multiply),
            '/' => Some(Divide),
            _ => None,
        }
    }
}

impl Expression {
    pub fn binary(op: Operator, lhs: Expression, rhs: Expression) -> Expression {
        Expression::Binary(op, Box::new(lhs), Box::new(rhs))
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Operator::*;
        match self {
            Add => write!(f, "+"),
            Subtract => write!(f, "-"),
            Multiply => write!(f, "*"),
            Divide => write!(f, "/"),
        }
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Expression::*;
        match self {
            Integer(n) => write!(f, "{}", n),
            String(s) => write!(f, "\"{}\"", s),
            // operators chain to the right
            Binary(op, lhs, rhs) => match **lhs {
                Binary(..) => write!(f, "({}){}{}", lhs, op, rhs),
                _ => write!(f, "{}{}{}", lhs, op, rhs),
            },
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Command::*;
        match self {
            Rem => write!(f, "REM"),
            Let(lhs, rhs) => write!(f, "LET {}={}", lhs, rhs),
            Print(expr, true) => write!(f, "PRINT {};", expr),
            Print(expr, false) => write!(f, "PRINT {}", expr),
            Input(expr) => write!(f, "INPUT {}", expr),
            Get(expr) => write!(f, "GET {}", expr),
            Put(expr) => write!(f, "PUT {}", expr),
            End => write!(f, "END"),
        }
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let commands: Vec<String> = self.commands.iter().map(|c| c.to_string()).collect();
        write!(f, "{} {}", self.number, commands.join(":"))
    }
}
