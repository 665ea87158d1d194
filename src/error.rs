/// Every error type must implement this trait.
///
/// All errors in the interpreter are fatal: a phase returns the error
/// through its `Result`, the driver throws it and exits with code 1.
pub trait Error: std::fmt::Debug {
    /// Prints the diagnostic on the error channel.
    fn throw(&self);
}

/// Represents an error that occurs during scanning or screening.
#[derive(Debug, PartialEq, Eq)]
pub struct ScanError {
    pub line: usize,
    pub message: String,
}

impl ScanError {
    pub fn new(line: usize, message: impl Into<String>) -> ScanError {
        ScanError { line, message: message.into() }
    }
}

impl Error for ScanError {
    fn throw(&self) {
        eprintln!("Scan error on line {line}: {message}", line = self.line, message = self.message);
    }
}

/// Represents an error that occurs during parsing.
#[derive(Debug, PartialEq, Eq)]
pub struct ParseError {
    pub line: usize,
    pub message: String,
}

impl ParseError {
    /// Creates an expected/got mismatch diagnostic.
    pub fn expected(line: usize, expected: &str, got: &str) -> ParseError {
        ParseError {
            line,
            message: format!("expected {expected}, got {got}"),
        }
    }
}

impl Error for ParseError {
    fn throw(&self) {
        eprintln!("Syntax error on line {line}: {message}", line = self.line, message = self.message);
    }
}

/// Represents an error that occurs while the CSE machine is running.
#[derive(Debug, PartialEq, Eq)]
pub struct RuntimeError {
    pub message: String,
}

impl RuntimeError {
    pub fn new(message: impl Into<String>) -> RuntimeError {
        RuntimeError { message: message.into() }
    }

    /// The stack never runs dry mid-rule in a well-formed program.
    pub fn empty_stack() -> RuntimeError {
        RuntimeError::new("Error: CSE execution stack unexpectedly empty.")
    }

    pub fn undeclared(name: &str) -> RuntimeError {
        RuntimeError::new(format!("Undeclared Identifier: {name}"))
    }
}

impl Error for RuntimeError {
    fn throw(&self) {
        eprintln!("{}", self.message);
    }
}
