/// ## Program text as loaded
///
/// Holds the original text next to the normalized text the scanner sees.
/// Every byte of the normalized text remembers which byte of the original
/// it came from so errors can point at what the user actually wrote.

#[derive(Debug, Clone)]
pub struct Source {
    original: String,
    text: String,
    origins: Vec<usize>,
}

/// Where in the original text something went wrong.
#[derive(Debug, Clone, PartialEq)]
pub struct Locator {
    line: usize,
    column: usize,
    text: String,
}

impl Locator {
    /// 1-based line number.
    pub fn line(&self) -> usize {
        self.line
    }

    /// 0-based column, counted in characters.
    pub fn column(&self) -> usize {
        self.column
    }

    /// The offending source line, without its terminator.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}\n{:>w$}", self.text, "^", w = self.column + 1)
    }
}

impl Source {
    pub fn new(original: &str) -> Source {
        let mut text = String::with_capacity(original.len() + 1);
        let mut origins = Vec::with_capacity(original.len() + 1);
        let mut quote = false;
        let mut after_newline = false;
        let mut after_colon = false;
        let mut chars = original.char_indices().peekable();
        while let Some((index, ch)) = chars.next() {
            if ch == '\r' && matches!(chars.peek(), Some((_, '\n'))) {
                continue;
            }
            let keep = quote || !ch.is_whitespace() || (ch == '\n' && !after_newline && !after_colon);
            if ch == '"' {
                quote = !quote;
            }
            if keep {
                after_newline = ch == '\n';
                after_colon = ch == ':';
                let start = text.len();
                text.push(ch);
                origins.extend(std::iter::repeat(index).take(text.len() - start));
            }
        }
        let trimmed_end = text.trim_end().len();
        text.truncate(trimmed_end);
        origins.truncate(trimmed_end);
        let trimmed_start = text.len() - text.trim_start().len();
        text.drain(..trimmed_start);
        origins.drain(..trimmed_start);
        text.push('\n');
        origins.push(original.len());
        Source {
            original: original.to_string(),
            text,
            origins,
        }
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    /// The normalized text handed to the scanner.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Maps a byte offset in the normalized text back to the original.
    pub fn origin(&self, offset: usize) -> usize {
        match self.origins.get(offset) {
            Some(origin) => *origin,
            None => self.original.len(),
        }
    }

    pub fn locate(&self, offset: usize) -> Locator {
        let origin = self.origin(offset).min(self.original.len());
        let line_start = match self.original[..origin].rfind('\n') {
            Some(newline) => newline + 1,
            None => 0,
        };
        let line_end = match self.original[line_start..].find('\n') {
            Some(newline) => line_start + newline,
            None => self.original.len(),
        };
        Locator {
            line: self.original[..line_start].matches('\n').count() + 1,
            column: self.original[line_start..origin].chars().count(),
            text: self.original[line_start..line_end]
                .trim_end_matches('\r')
                .to_string(),
        }
    }
}
