use crate::lang::ast::{Command, Expression, Line};
use crate::lang::{Error, Parser, Source};
use std::collections::HashSet;

/// ## Parsed program
///
/// Lines in declaration order. Nothing is checked here: duplicate or
/// unreachable line numbers are left for the runtime to sort out.

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    lines: Vec<Line>,
}

impl Program {
    pub fn new(lines: Vec<Line>) -> Program {
        Program { lines }
    }

    pub fn load(text: &str) -> Result<Program, Error> {
        Program::load_with(&Parser::new()?, text)
    }

    pub fn load_with(parser: &Parser, text: &str) -> Result<Program, Error> {
        Ok(Program::new(parser.parse(&Source::new(text))?))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> std::slice::Iter<'_, Line> {
        self.lines.iter()
    }

    /// The unevaluated number expression of the line at `index`.
    pub fn number(&self, index: usize) -> Option<&Expression> {
        self.lines.get(index).map(|line| &line.number)
    }

    pub fn commands(&self, index: usize) -> Option<&[Command]> {
        self.lines.get(index).map(|line| line.commands.as_slice())
    }

    /// Every literal address any line number could read.
    pub fn number_addresses(&self) -> HashSet<i64> {
        fn visit(expr: &Expression, found: &mut HashSet<i64>) {
            match expr {
                Expression::Integer(n) => {
                    found.insert(*n);
                }
                Expression::String(_) => {}
                Expression::Binary(_, lhs, rhs) => {
                    visit(lhs, found);
                    visit(rhs, found);
                }
            }
        }
        let mut found = HashSet::new();
        for line in &self.lines {
            visit(&line.number, &mut found);
        }
        found
    }
}

impl std::fmt::Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_and_lookup() {
        let p = Program::load("20 END\n10 PRINT 1").unwrap();
        assert_eq!(p.len(), 2);
        assert_eq!(p.number(0), Some(&Expression::Integer(20)));
        assert_eq!(p.commands(1), Some(&[Command::Print(Expression::Integer(1), false)][..]));
        assert_eq!(p.number(2), None);
    }

    #[test]
    fn test_listing() {
        let p = Program::load("10 LET 1 = (2+3)*4 : PRINT \"A\";\n(5+5) END").unwrap();
        assert_eq!(p.to_string(), "10 LET 1=(2+3)*4:PRINT \"A\";\n5+5 END\n");
    }

    #[test]
    fn test_number_addresses() {
        let p = Program::load("10 END\n(10+20) END\n\"X\" END").unwrap();
        let found = p.number_addresses();
        assert_eq!(found.len(), 2);
        assert!(found.contains(&10) && found.contains(&20));
    }
}
