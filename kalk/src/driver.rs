use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::process::ExitCode;

use codespan_reporting::term::termcolor::{ColorChoice, StandardStream, WriteColor};
use kalkc::Dialect;
use kalkc::eval::evaluate;
use kalkrt::{Env, Value};
use log::{debug, error};

use crate::cli::{Cli, Format};
use crate::editor::{EXIT, Editor, EditorRead};
use crate::report::Report;

const BANNER: &str = "Kalkumulator";

enum Source {
    Repl,
    Stdin,
    File(String),
}

/// What happened to one line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Value(Value),
    /// Reported, carry on with the next line.
    Failed,
    /// Reported, the session must end with a failure status.
    Fatal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Finished,
    Aborted,
}

pub struct Driver {
    source:             Source,
    quiet:              bool,
    format:             Format,
    dialect:            Dialect,
    exit_on_eval_error: bool,
    vi:                 bool,
    env:                Env,
}

impl Default for Driver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver {
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(<Cli as clap::Parser>::parse())
    }

    #[must_use]
    fn from_config(cfg: Cli) -> Self {
        let source = if cfg.stdin {
            Source::Stdin
        } else {
            cfg.file.map_or(Source::Repl, Source::File)
        };
        let dialect = if cfg.variables {
            Dialect::Variables
        } else {
            Dialect::Arithmetic
        };
        Self {
            source,
            quiet: cfg.quiet,
            format: cfg.format,
            dialect,
            exit_on_eval_error: cfg.exit_on_eval_error,
            vi: cfg.vi,
            env: Env::new(),
        }
    }

    pub fn run(mut self) -> ExitCode {
        let writer = StandardStream::stderr(ColorChoice::Always);
        let status = match std::mem::replace(&mut self.source, Source::Repl) {
            Source::Repl => self.repl(&mut writer.lock()),
            Source::Stdin => self.batch(
                io::stdin().lock(),
                &mut io::stdout().lock(),
                &mut writer.lock(),
            ),
            Source::File(path) => match File::open(&path) {
                Ok(file) => self.batch(
                    BufReader::new(file),
                    &mut io::stdout().lock(),
                    &mut writer.lock(),
                ),
                Err(err) => {
                    error!("could not read {path}: {err}");
                    return ExitCode::FAILURE;
                }
            },
        };

        match status {
            Ok(Status::Finished) => ExitCode::SUCCESS,
            Ok(Status::Aborted) => ExitCode::FAILURE,
            Err(err) => {
                error!("{err}");
                ExitCode::FAILURE
            }
        }
    }

    fn report<E: Report>(
        &self,
        writer: &mut dyn WriteColor,
        input: &str,
        error: &E,
    ) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        error.report(writer, input, self.format)
    }

    /// Tokenizes, parses and evaluates one line, printing the result to
    /// `out` or a diagnostic to `writer`.
    pub fn eval_line(
        &mut self,
        input: &str,
        out: &mut impl Write,
        writer: &mut dyn WriteColor,
    ) -> io::Result<Outcome> {
        let expr = match kalkc::compile(input, self.dialect) {
            Ok(expr) => expr,
            Err(err) => {
                self.report(writer, input, &err)?;
                return Ok(Outcome::Failed);
            }
        };

        match evaluate(&expr, &mut self.env) {
            Ok(value) => {
                writeln!(out, "{value}")?;
                Ok(Outcome::Value(value))
            }
            Err(err) => {
                self.report(writer, input, &err)?;
                if self.exit_on_eval_error {
                    Ok(Outcome::Fatal)
                } else {
                    Ok(Outcome::Failed)
                }
            }
        }
    }

    fn repl(&mut self, writer: &mut dyn WriteColor) -> io::Result<Status> {
        print_banner(&mut io::stdout().lock())?;
        let mut editor = Editor::new(self.vi);
        loop {
            let signal = editor.read()?;
            let input = match signal {
                EditorRead::Read(input) => input,
                EditorRead::Break => break,
            };

            let outcome = self.eval_line(&input, &mut io::stdout().lock(), writer)?;
            if outcome == Outcome::Fatal {
                return Ok(Status::Aborted);
            }
        }

        Ok(Status::Finished)
    }

    fn batch(
        &mut self,
        lines: impl BufRead,
        out: &mut impl Write,
        writer: &mut dyn WriteColor,
    ) -> io::Result<Status> {
        for (number, line) in lines.lines().enumerate() {
            let line = line?;
            if line == EXIT {
                debug!("exit at line {}", number + 1);
                break;
            }
            if self.eval_line(&line, out, writer)? == Outcome::Fatal {
                return Ok(Status::Aborted);
            }
        }

        Ok(Status::Finished)
    }
}

fn print_banner(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{BANNER}")?;
    writeln!(out, "{}", "~".repeat(BANNER.len()))
}
