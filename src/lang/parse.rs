use super::grammar::{class, first, lit, many, rule, Failure, Grammar, Production, Symbol};
use super::{ast::*, lex::*, scan::Scanner, token::*, Error, Source};
use tracing::debug;

type Result<T> = std::result::Result<T, Error>;

/// Values built while parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Token(Token),
    Expression(Expression),
    Command(Command),
    /// An operator and the operand after it, waiting to be chained.
    Operation(Operator, Expression),
    Line(Line),
    Lines(Vec<Line>),
}

impl From<Token> for Node {
    fn from(token: Token) -> Node {
        Node::Token(token)
    }
}

impl Node {
    fn into_expression(self) -> Option<Expression> {
        match self {
            Node::Expression(expr) => Some(expr),
            _ => None,
        }
    }

    fn into_command(self) -> Option<Command> {
        match self {
            Node::Command(command) => Some(command),
            _ => None,
        }
    }
}

pub struct Parser {
    scanner: Scanner<Token>,
    grammar: Grammar<Token, Node>,
}

impl Parser {
    pub fn new() -> Result<Parser> {
        Ok(Parser {
            scanner: scanner()?,
            grammar: forter(),
        })
    }

    pub fn with_max_depth(self, max_depth: usize) -> Parser {
        Parser {
            scanner: self.scanner,
            grammar: self.grammar.with_max_depth(max_depth),
        }
    }

    pub fn parse(&self, source: &Source) -> Result<Vec<Line>> {
        let (tokens, spans) = match tokenize(&self.scanner, source.text()) {
            Ok(lexed) => lexed,
            Err(e) => {
                let locator = source.locate(e.offset().unwrap_or(0));
                return Err(e.with_locator(locator));
            }
        };
        let offset_of = |index: usize| match spans.get(index) {
            Some(span) => span.start,
            None => source.text().len().saturating_sub(1),
        };
        let lines = match self.grammar.parse("script", &tokens) {
            Ok(Node::Lines(lines)) => lines,
            Ok(node) => {
                return Err(error!(InternalError; format!("SCRIPT PARSED AS {:?}", node)));
            }
            Err(Failure::Mismatch { farthest }) => {
                let message = match tokens.get(farthest) {
                    Some(Token::Newline) | None => "UNEXPECTED END OF LINE".to_string(),
                    Some(token) => format!("UNEXPECTED {}", token),
                };
                let offset = offset_of(farthest);
                return Err(error!(SyntaxError, ..offset; message).with_locator(source.locate(offset)));
            }
            Err(Failure::TooDeep { at }) => {
                let offset = offset_of(at);
                return Err(error!(OutOfMemory, ..offset; "PROGRAM NESTED TOO DEEPLY")
                    .with_locator(source.locate(offset)));
            }
            Err(Failure::UndefinedRule(name)) => {
                return Err(error!(InternalError; format!("UNDEFINED RULE {}", name)));
            }
        };
        debug!(tokens = tokens.len(), lines = lines.len(), "parsed program");
        Ok(lines)
    }
}

pub fn parse(source: &Source) -> Result<Vec<Line>> {
    Parser::new()?.parse(source)
}

fn keyword(word: &str, rest: Vec<Symbol<Token>>) -> Vec<Symbol<Token>> {
    word.chars()
        .map(|ch| lit(Token::Char(ch)))
        .chain(rest.into_iter())
        .collect()
}

fn command(command: Command) -> Option<Node> {
    Some(Node::Command(command))
}

/// Folds `a op b op c` to the right: `a op (b op c)`.
fn chain(v: Vec<Node>) -> Option<Node> {
    let mut v = v.into_iter();
    let mut operands = vec![v.next()?.into_expression()?];
    let mut operators = vec![];
    for node in v {
        match node {
            Node::Operation(op, expr) => {
                operators.push(op);
                operands.push(expr);
            }
            _ => return None,
        }
    }
    let mut expr = operands.pop()?;
    while let Some(op) = operators.pop() {
        expr = Expression::binary(op, operands.pop()?, expr);
    }
    Some(Node::Expression(expr))
}

fn forter() -> Grammar<Token, Node> {
    let mut g = Grammar::new();

    g.define(
        "script",
        vec![Production::new(vec![rule("line"), many("line")], |v: Vec<Node>| {
            let mut lines = Vec::with_capacity(v.len());
            for node in v {
                match node {
                    Node::Line(line) => lines.push(line),
                    _ => return None,
                }
            }
            Some(Node::Lines(lines))
        })],
    );
    g.define(
        "line",
        vec![Production::new(
            vec![rule("expr"), rule("command"), many("more"), lit(Token::Newline)],
            |v: Vec<Node>| {
                let mut v = v.into_iter();
                let number = v.next()?.into_expression()?;
                let commands = v.filter_map(Node::into_command).collect();
                Some(Node::Line(Line { number, commands }))
            },
        )],
    );
    g.define(
        "more",
        vec![Production::new(
            vec![class(Token::is_separator), rule("command")],
            |mut v: Vec<Node>| v.pop(),
        )],
    );

    g.define(
        "command",
        vec![
            Production::new(keyword("REM", vec![many("remark")]), |_: Vec<Node>| {
                command(Command::Rem)
            }),
            Production::new(
                keyword("LET", vec![rule("expr"), lit(Token::Char('=')), rule("expr")]),
                |mut v: Vec<Node>| {
                    let rhs = v.pop()?.into_expression()?;
                    v.pop()?;
                    let lhs = v.pop()?.into_expression()?;
                    command(Command::Let(lhs, rhs))
                },
            ),
            Production::new(keyword("PRINT", vec![rule("print")]), |mut v: Vec<Node>| {
                command(v.pop()?.into_command()?)
            }),
            Production::new(keyword("INPUT", vec![rule("expr")]), |mut v: Vec<Node>| {
                command(Command::Input(v.pop()?.into_expression()?))
            }),
            Production::new(keyword("GET", vec![rule("expr")]), |mut v: Vec<Node>| {
                command(Command::Get(v.pop()?.into_expression()?))
            }),
            Production::new(keyword("PUT", vec![rule("expr")]), |mut v: Vec<Node>| {
                command(Command::Put(v.pop()?.into_expression()?))
            }),
            Production::new(keyword("END", vec![]), |_: Vec<Node>| command(Command::End)),
        ],
    );
    g.define(
        "remark",
        vec![Production::new(vec![class(Token::is_remark)], first)],
    );
    g.define(
        "print",
        vec![
            Production::new(vec![rule("expr"), lit(Token::Char(';'))], |v: Vec<Node>| {
                command(Command::Print(first(v)?.into_expression()?, true))
            }),
            Production::new(vec![rule("expr")], |v: Vec<Node>| {
                command(Command::Print(first(v)?.into_expression()?, false))
            }),
        ],
    );

    g.define(
        "expr",
        vec![Production::new(vec![rule("pexpr"), many("operation")], chain)],
    );
    g.define(
        "operation",
        vec![Production::new(
            vec![class(Token::is_operator), rule("pexpr")],
            |mut v: Vec<Node>| {
                let rhs = v.pop()?.into_expression()?;
                let op = match v.pop()? {
                    Node::Token(Token::Char(ch)) => Operator::from_char(ch)?,
                    _ => return None,
                };
                Some(Node::Operation(op, rhs))
            },
        )],
    );
    g.define(
        "pexpr",
        vec![
            Production::new(vec![class(Token::is_integer)], |v: Vec<Node>| match first(v)? {
                Node::Token(Token::Integer(n)) => Some(Node::Expression(Expression::Integer(n))),
                _ => None,
            }),
            Production::new(vec![class(Token::is_string)], |v: Vec<Node>| match first(v)? {
                Node::Token(Token::String(s)) => Some(Node::Expression(Expression::String(s))),
                _ => None,
            }),
            Production::new(
                vec![lit(Token::Char('(')), rule("expr"), lit(Token::Char(')'))],
                |mut v: Vec<Node>| {
                    v.pop()?;
                    v.pop()
                },
            ),
        ],
    );

    g
}
