use super::{Address, Cell, CellStore, Operation, Program, Val};
use crate::error;
use crate::lang::ast::{Command, Expression};
use crate::lang::Error;
use std::collections::HashSet;
use std::convert::TryFrom;
use tracing::{debug, trace};

type Result<T> = std::result::Result<T, Error>;

/// Value a `GET` stores when input is exhausted.
pub const END_OF_INPUT: i64 = 256;

/// ## Events
///
/// `execute` runs until something needs the outside world and reports it.

#[derive(Debug)]
pub enum Event {
    Stopped,
    Running,
    Print(String),
    Put(u8),
    Input,
    Get,
    Error(Error),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Running,
    Waiting(Wait),
    Halted,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Wait {
    Line(Address),
    Char(Address),
}

/// The line being executed: its index, its evaluated number and the
/// next command to run.
#[derive(Debug, Clone, Copy)]
struct Current {
    index: usize,
    number: i64,
    pc: usize,
}

#[derive(Debug)]
pub struct Runtime {
    program: Program,
    cells: CellStore,
    number_addresses: HashSet<Address>,
    cursor: Option<i64>,
    current: Option<Current>,
    state: State,
    error: Option<Error>,
}

impl Default for Runtime {
    fn default() -> Self {
        Runtime::new(Program::default())
    }
}

impl Runtime {
    pub fn new(program: Program) -> Runtime {
        Runtime {
            number_addresses: program.number_addresses(),
            program,
            cells: CellStore::new(),
            cursor: None,
            current: None,
            state: State::Running,
            error: None,
        }
    }

    pub fn load(text: &str) -> Result<Runtime> {
        Ok(Runtime::new(Program::load(text)?))
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn cells(&self) -> &CellStore {
        &self.cells
    }

    /// Evaluated number of the last line that ran to completion.
    pub fn cursor(&self) -> Option<i64> {
        self.cursor
    }

    pub fn is_halted(&self) -> bool {
        self.state == State::Halted
    }

    /// Stops the program; the next `execute` reports a BREAK.
    pub fn interrupt(&mut self) {
        if self.state != State::Halted {
            let mut e = error!(Break);
            if let Some(number) = self.current.map(|c| c.number).or(self.cursor) {
                e = e.in_line_number(number);
            }
            self.error = Some(e);
            self.state = State::Halted;
        }
    }

    /// Answers `Event::Input`. `None` means input is exhausted.
    pub fn enter_line(&mut self, line: Option<&str>) -> bool {
        match self.state {
            State::Waiting(Wait::Line(address)) => {
                let n = line.map(read_integer).unwrap_or(0);
                self.resume(address, n)
            }
            _ => false,
        }
    }

    /// Answers `Event::Get`. `None` means input is exhausted.
    pub fn enter_char(&mut self, byte: Option<u8>) -> bool {
        match self.state {
            State::Waiting(Wait::Char(address)) => {
                let n = byte.map(i64::from).unwrap_or(END_OF_INPUT);
                self.resume(address, n)
            }
            _ => false,
        }
    }

    fn resume(&mut self, address: Address, n: i64) -> bool {
        self.state = State::Running;
        if let Err(e) = self.cells.rebind(address, Cell::Value(Val::Integer(n))) {
            self.fail(e);
        }
        true
    }

    fn fail(&mut self, e: Error) {
        let e = match self.current.map(|c| c.number) {
            Some(number) if e.line_number().is_none() => e.in_line_number(number),
            _ => e,
        };
        self.error = Some(e);
        self.state = State::Halted;
    }

    /// Runs at most `cycles` commands.
    pub fn execute(&mut self, cycles: usize) -> Event {
        for _ in 0..cycles {
            match self.state {
                State::Halted => break,
                State::Waiting(Wait::Line(_)) => return Event::Input,
                State::Waiting(Wait::Char(_)) => return Event::Get,
                State::Running => {}
            }
            match self.step() {
                Ok(Some(event)) => return event,
                Ok(None) => {}
                Err(e) => self.fail(e),
            }
        }
        if self.state == State::Halted {
            return match self.error.take() {
                Some(e) => Event::Error(e),
                None => Event::Stopped,
            };
        }
        Event::Running
    }

    fn step(&mut self) -> Result<Option<Event>> {
        let current = match self.current {
            Some(current) => current,
            None => {
                let (index, number) = self.select()?;
                debug!(line = number, index, "dispatch");
                let current = Current { index, number, pc: 0 };
                self.current = Some(current);
                current
            }
        };
        let command = match self.program.commands(current.index) {
            Some(commands) => commands.get(current.pc).cloned(),
            None => return Err(error!(InternalError; "LINE VANISHED")),
        };
        match command {
            Some(command) => {
                self.current = Some(Current {
                    pc: current.pc + 1,
                    ..current
                });
                self.command(&command)
            }
            None => {
                self.cursor = Some(current.number);
                self.current = None;
                Ok(None)
            }
        }
    }

    /// Picks the line with the smallest evaluated number after the cursor.
    /// Every line number is evaluated again because cells may have moved.
    fn select(&self) -> Result<(usize, i64)> {
        let mut best: Option<(usize, i64)> = None;
        for (index, line) in self.program.lines().enumerate() {
            let number = match i64::try_from(self.evaluate(&line.number)?) {
                Ok(number) => number,
                Err(e) => return Err(e.message(format!("LINE NUMBER {}", line.number))),
            };
            if let Some(cursor) = self.cursor {
                if number <= cursor {
                    continue;
                }
            }
            match best {
                Some((_, best_number)) if best_number < number => {}
                Some((best_index, best_number)) if best_number == number => {
                    debug!(line = number, best_index, index, "duplicate line number");
                }
                _ => best = Some((index, number)),
            }
        }
        match (best, self.cursor) {
            (Some(best), _) => Ok(best),
            (None, Some(cursor)) => {
                Err(error!(UndefinedLine; format!("NO LINE AFTER {}", cursor)).in_line_number(cursor))
            }
            (None, None) => Err(error!(UndefinedLine; "NO LINES")),
        }
    }

    fn command(&mut self, command: &Command) -> Result<Option<Event>> {
        trace!(%command, "execute");
        match command {
            Command::Rem => Ok(None),
            Command::Let(lhs, rhs) => {
                let value = self.evaluate(rhs)?;
                let address = self.address(lhs)?;
                if self.number_addresses.contains(&address) {
                    debug!(address, %value, "line number cell rebound");
                }
                self.cells.rebind(address, Cell::Value(value))?;
                Ok(None)
            }
            Command::Print(expr, suppress_newline) => {
                let mut s = self.evaluate(expr)?.to_string();
                if !suppress_newline {
                    s.push('\n');
                }
                Ok(Some(Event::Print(s)))
            }
            Command::Input(expr) => {
                self.state = State::Waiting(Wait::Line(self.address(expr)?));
                Ok(Some(Event::Input))
            }
            Command::Get(expr) => {
                self.state = State::Waiting(Wait::Char(self.address(expr)?));
                Ok(Some(Event::Get))
            }
            Command::Put(expr) => match self.evaluate(expr)? {
                Val::Integer(n) => Ok(Some(Event::Put(n as u8))),
                Val::String(s) => Ok(s.bytes().next().map(Event::Put)),
            },
            Command::End => {
                self.state = State::Halted;
                Ok(Some(Event::Stopped))
            }
        }
    }

    /// A bare integer names a cell without reading it. Anything else is
    /// evaluated and the result names the cell.
    fn address(&self, expr: &Expression) -> Result<Address> {
        match expr {
            Expression::Integer(n) => Ok(*n),
            _ => i64::try_from(self.evaluate(expr)?),
        }
    }

    pub fn evaluate(&self, expr: &Expression) -> Result<Val> {
        match expr {
            Expression::Integer(n) => self.cells.resolve(*n),
            Expression::String(s) => Ok(Val::String(s.clone())),
            Expression::Binary(op, lhs, rhs) => {
                Operation::apply(*op, self.evaluate(lhs)?, self.evaluate(rhs)?)
            }
        }
    }
}

/// Leading integer of `s`, or 0 when there is none.
fn read_integer(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let mut n: i64 = 0;
    for d in digits.chars().map_while(|c| c.to_digit(10)) {
        let d = i64::from(d);
        n = if negative {
            n.saturating_mul(10).saturating_sub(d)
        } else {
            n.saturating_mul(10).saturating_add(d)
        };
    }
    n
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_integer() {
        assert_eq!(read_integer("42"), 42);
        assert_eq!(read_integer("  -17xyz"), -17);
        assert_eq!(read_integer("+3"), 3);
        assert_eq!(read_integer("abc"), 0);
        assert_eq!(read_integer(""), 0);
        assert_eq!(read_integer("99999999999999999999"), i64::MAX);
    }
}
