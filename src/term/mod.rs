/*!
## Rust Terminal Module

Command line front end. Loads a program, then drives the runtime against
standard input and output until it stops.

*/

use crate::lang::{Error, Parser};
use crate::mach::{Event, Program, Runtime};
use crate::error;
use ansi_term::Style;
use clap::Parser as _;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Commands run between checks for Ctrl-C.
pub const DEFAULT_CYCLES: usize = 5000;

// Parsing and evaluation recurse once per nesting level; room for a raised `--max-depth`.
const STACK_SIZE: usize = 256 * 1024 * 1024;

/// Runs a Forter program.
#[derive(clap::Parser, Debug)]
#[command(name = "forter", version, about, long_about = None)]
struct Args {
    /// Program file to run.
    #[arg(required_unless_present = "eval")]
    file: Option<PathBuf>,

    /// Program text to run instead of a file.
    #[arg(short, long, conflicts_with = "file")]
    eval: Option<String>,

    /// Commands to run between interrupt checks.
    #[arg(long, default_value_t = DEFAULT_CYCLES)]
    cycles: usize,

    /// Parser recursion limit.
    #[arg(long)]
    max_depth: Option<usize>,

    /// More logging on stderr. Repeat for trace output.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

pub fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    }) {
        debug!(error = %e, "no Ctrl-C handler");
    }

    let worker = std::thread::Builder::new()
        .name("forter".into())
        .stack_size(STACK_SIZE)
        .spawn(move || main_loop(args, &interrupted));
    let result = match worker {
        Ok(handle) => match handle.join() {
            Ok(result) => result,
            Err(_) => Err(error!(InternalError; "INTERPRETER PANICKED")),
        },
        Err(e) => Err(error!(InternalError; e.to_string())),
    };
    if let Err(error) = result {
        eprintln!("{}", Style::new().bold().paint(error.to_string()));
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main_loop(args: Args, interrupted: &AtomicBool) -> Result<(), Error> {
    let text = match (&args.eval, &args.file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => std::fs::read_to_string(path).map_err(|e| {
            error!(InternalError; format!("CAN'T READ {}: {}", path.display(), e))
        })?,
        (None, None) => return Err(error!(InternalError; "NO PROGRAM")),
    };
    let mut parser = Parser::new()?;
    if let Some(max_depth) = args.max_depth {
        parser = parser.with_max_depth(max_depth);
    }
    let program = Program::load_with(&parser, &text)?;
    debug!(lines = program.len(), "loaded");
    let mut runtime = Runtime::new(program);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    drive(
        &mut runtime,
        stdin.lock(),
        stdout.lock(),
        args.cycles.max(1),
        interrupted,
    )
}

/// Parses and runs `source`, reading `INPUT` and `GET` from `input`.
pub fn run<R: BufRead, W: Write>(source: &str, input: R, output: W) -> Result<(), Error> {
    let mut runtime = Runtime::new(Program::load(source)?);
    let interrupted = AtomicBool::new(false);
    drive(&mut runtime, input, output, DEFAULT_CYCLES, &interrupted)
}

/// Answers runtime events until the program stops or fails.
/// Setting `interrupted` breaks into the program at the next check.
pub fn drive<R: BufRead, W: Write>(
    runtime: &mut Runtime,
    mut input: R,
    mut output: W,
    cycles: usize,
    interrupted: &AtomicBool,
) -> Result<(), Error> {
    loop {
        if interrupted.swap(false, Ordering::SeqCst) {
            runtime.interrupt();
        }
        match runtime.execute(cycles) {
            Event::Stopped => break,
            Event::Running => {}
            Event::Print(s) => output.write_all(s.as_bytes()).map_err(io_error)?,
            Event::Put(byte) => output.write_all(&[byte]).map_err(io_error)?,
            Event::Input => {
                output.flush().map_err(io_error)?;
                let line = read_line(&mut input)?;
                runtime.enter_line(line.as_deref());
            }
            Event::Get => {
                output.flush().map_err(io_error)?;
                let byte = read_byte(&mut input)?;
                runtime.enter_char(byte);
            }
            Event::Error(error) => {
                output.flush().map_err(io_error)?;
                return Err(error);
            }
        }
    }
    output.flush().map_err(io_error)
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>, Error> {
    let mut s = String::new();
    if input.read_line(&mut s).map_err(io_error)? == 0 {
        return Ok(None);
    }
    let len = s.trim_end_matches(&['\r', '\n'][..]).len();
    s.truncate(len);
    Ok(Some(s))
}

fn read_byte<R: BufRead>(input: &mut R) -> Result<Option<u8>, Error> {
    let byte = input.fill_buf().map_err(io_error)?.first().copied();
    if byte.is_some() {
        input.consume(1);
    }
    Ok(byte)
}

fn io_error(e: std::io::Error) -> Error {
    error!(InternalError; e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;

    fn output(source: &str, input: &str) -> String {
        let mut out = Vec::new();
        run(source, input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_read_line_strips_line_endings() {
        let mut input = "abc\r\ndef\n".as_bytes();
        assert_eq!(read_line(&mut input).unwrap().as_deref(), Some("abc"));
        assert_eq!(read_line(&mut input).unwrap().as_deref(), Some("def"));
        assert_eq!(read_line(&mut input).unwrap(), None);
    }

    #[test]
    fn test_read_byte() {
        let mut input = "ab".as_bytes();
        assert_eq!(read_byte(&mut input).unwrap(), Some(b'a'));
        assert_eq!(read_byte(&mut input).unwrap(), Some(b'b'));
        assert_eq!(read_byte(&mut input).unwrap(), None);
    }

    #[test]
    fn test_input_and_get_share_a_stream() {
        let s = output("10 INPUT 1:GET 2:PRINT 1:PRINT 2:END", "12\nZ");
        assert_eq!(s, "12\n90\n");
    }

    #[test]
    fn test_interrupt_is_break() {
        let mut runtime = Runtime::load("10 LET 1=1:LET 10=5\n20 END").unwrap();
        let interrupted = AtomicBool::new(true);
        let mut out = Vec::new();
        let e = drive(&mut runtime, "".as_bytes(), &mut out, 10, &interrupted).unwrap_err();
        assert!(e.is(ErrorCode::Break));
        assert!(!interrupted.load(Ordering::SeqCst));
    }

    #[test]
    fn test_error_keeps_earlier_output() {
        let mut out = Vec::new();
        let e = run("10 PRINT 1\n20 PRINT 1/0", "".as_bytes(), &mut out).unwrap_err();
        assert!(e.is(ErrorCode::DivisionByZero));
        assert_eq!(e.line_number(), Some(20));
        assert_eq!(out, b"1\n");
    }
}
