use clap::builder::styling::{AnsiColor, Effects, Style, Styles};

#[derive(clap::Parser, Debug, Clone, Default)]
#[clap(styles = CARGO_STYLING, about = "Integer calculator")]
pub struct Cli {
    /// Evaluate every line of this file instead of starting a prompt
    pub file: Option<String>,

    /// Do not print diagnostics
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    /// Read input lines from stdin
    #[arg(long, default_value_t = false, conflicts_with = "file")]
    pub stdin: bool,

    /// How to render errors
    #[arg(long, value_enum, default_value_t = Format::Caret)]
    pub format: Format,

    /// Allow `name = expr` assignments and variable references
    #[arg(long, default_value_t = false)]
    pub variables: bool,

    /// Stop with a failure status on the first evaluation error
    #[arg(long, default_value_t = false)]
    pub exit_on_eval_error: bool,

    /// Use vi key bindings at the prompt
    #[arg(long, default_value_t = false)]
    pub vi: bool,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Caret and tildes under the input line
    #[default]
    Caret,
    /// Labelled source snippet
    Rich,
}

const HEADER: Style = AnsiColor::Green.on_default().effects(Effects::BOLD);
const USAGE: Style = AnsiColor::Green.on_default().effects(Effects::BOLD);
const LITERAL: Style = AnsiColor::Cyan.on_default().effects(Effects::BOLD);
const PLACEHOLDER: Style = AnsiColor::Cyan.on_default();
const ERROR: Style = AnsiColor::Red.on_default().effects(Effects::BOLD);
const VALID: Style = AnsiColor::Cyan.on_default().effects(Effects::BOLD);
const INVALID: Style = AnsiColor::Yellow.on_default().effects(Effects::BOLD);

/// Cargo's color style
/// [source](https://github.com/crate-ci/clap-cargo/blob/master/src/style.rs)
const CARGO_STYLING: Styles = Styles::styled()
    .header(HEADER)
    .usage(USAGE)
    .literal(LITERAL)
    .placeholder(PLACEHOLDER)
    .error(ERROR)
    .valid(VALID)
    .invalid(INVALID);
