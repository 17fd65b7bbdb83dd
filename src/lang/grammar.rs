/*!
## Backtracking grammar engine

Rules are ordered lists of productions. Productions are tried in the order
they were declared and the first one that matches wins, PEG style, with no
memoization. A rule that re-enters itself before consuming anything recurses
until the depth limit stops it.

Child values are passed to a production's action in order. Matched tokens
become values through `From<T>`. A repeated rule adds one value per match,
so actions of productions using `many` see a variable number of children.
An action returning `None` rejects the production as if one of its symbols
had failed to match.

Repetition runs in a loop, so only nesting counts against the depth limit.
*/

use std::collections::HashMap;

type Action<V> = Box<dyn Fn(Vec<V>) -> Option<V>>;

pub const DEFAULT_MAX_DEPTH: usize = 1_000;

pub enum Symbol<T> {
    Class(fn(&T) -> bool),
    Literal(T),
    Rule(&'static str),
    Many(&'static str),
}

/// Any token the test accepts.
pub fn class<T>(test: fn(&T) -> bool) -> Symbol<T> {
    Symbol::Class(test)
}

/// Exactly this token.
pub fn lit<T>(token: T) -> Symbol<T> {
    Symbol::Literal(token)
}

pub fn rule<T>(name: &'static str) -> Symbol<T> {
    Symbol::Rule(name)
}

/// Zero or more matches of a rule, greedy, never backtracked into.
pub fn many<T>(name: &'static str) -> Symbol<T> {
    Symbol::Many(name)
}

/// Action that keeps the first child value.
pub fn first<V>(values: Vec<V>) -> Option<V> {
    values.into_iter().next()
}

pub struct Production<T, V> {
    symbols: Vec<Symbol<T>>,
    action: Action<V>,
}

impl<T, V> Production<T, V> {
    pub fn new<F>(symbols: Vec<Symbol<T>>, action: F) -> Production<T, V>
    where
        F: Fn(Vec<V>) -> Option<V> + 'static,
    {
        Production {
            symbols,
            action: Box::new(action),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Failure {
    /// The start rule did not consume every token. `farthest` is the index
    /// of the first token no production got past.
    Mismatch { farthest: usize },
    UndefinedRule(&'static str),
    TooDeep { at: usize },
}

pub struct Grammar<T, V> {
    rules: HashMap<&'static str, Vec<Production<T, V>>>,
    max_depth: usize,
}

impl<T, V> Default for Grammar<T, V> {
    fn default() -> Self {
        Grammar {
            rules: HashMap::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl<T, V> Grammar<T, V>
where
    T: Clone + PartialEq,
    V: From<T>,
{
    pub fn new() -> Grammar<T, V> {
        Grammar::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Grammar<T, V> {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Registers `name`, replacing any earlier definition.
    pub fn define(&mut self, name: &'static str, productions: Vec<Production<T, V>>) {
        self.rules.insert(name, productions);
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    pub fn parse(&self, start: &'static str, tokens: &[T]) -> Result<V, Failure> {
        let mut parse = Parse {
            grammar: self,
            tokens,
            farthest: 0,
            depth: 0,
        };
        match parse.apply(start, 0)? {
            Some((value, end)) if end == tokens.len() => Ok(value),
            Some((_, end)) => Err(Failure::Mismatch {
                farthest: parse.farthest.max(end),
            }),
            None => Err(Failure::Mismatch {
                farthest: parse.farthest,
            }),
        }
    }
}

struct Parse<'a, T, V> {
    grammar: &'a Grammar<T, V>,
    tokens: &'a [T],
    farthest: usize,
    depth: usize,
}

impl<'a, T, V> Parse<'a, T, V>
where
    T: Clone + PartialEq,
    V: From<T>,
{
    fn reach(&mut self, pos: usize) {
        if pos > self.farthest {
            self.farthest = pos;
        }
    }

    fn apply(&mut self, name: &'static str, pos: usize) -> Result<Option<(V, usize)>, Failure> {
        let grammar = self.grammar;
        let productions = match grammar.rules.get(name) {
            Some(productions) => productions,
            None => return Err(Failure::UndefinedRule(name)),
        };
        if self.depth >= grammar.max_depth {
            return Err(Failure::TooDeep { at: pos });
        }
        self.depth += 1;
        let mut result = None;
        for production in productions {
            result = self.attempt(production, pos)?;
            if result.is_some() {
                break;
            }
        }
        self.depth -= 1;
        Ok(result)
    }

    fn attempt(
        &mut self,
        production: &Production<T, V>,
        pos: usize,
    ) -> Result<Option<(V, usize)>, Failure> {
        let mut at = pos;
        let mut values = Vec::with_capacity(production.symbols.len());
        for symbol in &production.symbols {
            let token = self.tokens.get(at);
            match symbol {
                Symbol::Class(test) => match token {
                    Some(t) if test(t) => values.push(V::from(t.clone())),
                    _ => {
                        self.reach(at);
                        return Ok(None);
                    }
                },
                Symbol::Literal(expected) => match token {
                    Some(t) if t == expected => values.push(V::from(t.clone())),
                    _ => {
                        self.reach(at);
                        return Ok(None);
                    }
                },
                Symbol::Rule(name) => match self.apply(name, at)? {
                    Some((value, next)) => {
                        values.push(value);
                        at = next;
                        continue;
                    }
                    None => return Ok(None),
                },
                Symbol::Many(name) => {
                    // a match that consumes nothing ends the repetition
                    while let Some((value, next)) = self.apply(name, at)? {
                        if next == at {
                            break;
                        }
                        values.push(value);
                        at = next;
                    }
                    continue;
                }
            }
            at += 1;
        }
        self.reach(at);
        Ok((production.action)(values).map(|value| (value, at)))
    }
}
