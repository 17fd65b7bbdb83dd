use super::Locator;

pub struct Error {
    code: u16,
    line_number: Option<i64>,
    offset: Option<usize>,
    locator: Option<Locator>,
    message: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident, ..$offset:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).at_offset($offset)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, ..$offset:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .at_offset($offset)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code: code as u16,
            line_number: None,
            offset: None,
            locator: None,
            message: String::new(),
        }
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn is(&self, code: ErrorCode) -> bool {
        self.code == code as u16
    }

    pub fn line_number(&self) -> Option<i64> {
        self.line_number
    }

    pub fn offset(&self) -> Option<usize> {
        self.offset
    }

    pub fn locator(&self) -> Option<&Locator> {
        self.locator.as_ref()
    }

    pub fn in_line_number(self, line_number: i64) -> Error {
        debug_assert!(self.line_number.is_none());
        Error {
            line_number: Some(line_number),
            ..self
        }
    }

    pub fn at_offset(self, offset: usize) -> Error {
        debug_assert!(self.offset.is_none());
        Error {
            offset: Some(offset),
            ..self
        }
    }

    pub fn with_locator(self, locator: Locator) -> Error {
        Error {
            locator: Some(locator),
            ..self
        }
    }

    pub fn message<S: AsRef<str>>(self, message: S) -> Error {
        debug_assert_eq!(self.message.len(), 0);
        Error {
            message: message.as_ref().to_string(),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Break = 0,
    SyntaxError = 2,
    Overflow = 6,
    OutOfMemory = 7,
    UndefinedLine = 8,
    DivisionByZero = 11,
    TypeMismatch = 13,
    InternalError = 51,
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let code_str = match self.code {
            0 => "BREAK",
            2 => "SYNTAX ERROR",
            6 => "OVERFLOW",
            7 => "OUT OF MEMORY",
            8 => "UNDEFINED LINE",
            11 => "DIVISION BY ZERO",
            13 => "TYPE MISMATCH",
            51 => "INTERNAL ERROR",
            _ => "",
        };
        let mut places = vec![];
        if let Some(line_number) = self.line_number {
            places.push(line_number.to_string());
        }
        if let Some(locator) = &self.locator {
            places.push(format!("{}:{}", locator.line(), locator.column()));
        }
        if code_str.is_empty() {
            write!(f, "PROGRAM ERROR {}", self.code)?;
        } else {
            write!(f, "{}", code_str)?;
        }
        if !places.is_empty() {
            write!(f, " IN {}", places.join(" "))?;
        }
        if !self.message.is_empty() {
            write!(f, "; {}", self.message)?;
        }
        if let Some(locator) = &self.locator {
            write!(f, "\n{}", locator)?;
        }
        Ok(())
    }
}
