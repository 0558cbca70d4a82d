mod render;

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;

use crate::application::{AppError, BudgetService, EntryInput};

pub use render::{added_message, write_entries, write_summary, write_view};

/// Budgety - income and expense budget tracker
#[derive(Parser, Debug)]
#[command(name = "budgety")]
#[command(
    about = "Track income and expenses for the month and see what is left",
    long_about = "Reads one command per line from stdin (or a script file), keeps the \
                  entries in memory and prints the updated budget after every change. \
                  Nothing is saved when the session ends."
)]
#[command(version)]
pub struct Cli {
    /// Output format for the budget view
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Read commands from this file instead of stdin
    #[arg(short, long)]
    pub script: Option<PathBuf>,

    /// Month shown in the header (YYYY-MM, defaults to the current month)
    #[arg(short, long)]
    pub month: Option<String>,

    /// Do not print the budget after every change
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Commands accepted on each input line.
#[derive(Parser, Debug)]
#[command(name = "budgety", no_binary_name = true, disable_version_flag = true)]
struct SessionLine {
    #[command(subcommand)]
    command: SessionCommand,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum SessionCommand {
    /// Add an income or expense entry
    #[command(allow_negative_numbers = true)]
    Add {
        /// Entry type: income, expense (or inc, exp, +, -)
        kind: String,

        /// Description (quote it if it contains spaces)
        description: String,

        /// Amount (e.g., "50.00" or "50")
        value: String,
    },

    /// Delete an entry by its reference (e.g., "expense-0")
    #[command(visible_alias = "rm")]
    Delete {
        /// Entry reference: income-<id> or expense-<id>
        entry: String,
    },

    /// Show the budget summary and all entries
    Show,

    /// List entries without the summary
    List,

    /// End the session
    #[command(visible_alias = "exit")]
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let period = match &self.month {
            Some(month) => parse_month(month)?,
            None => chrono::Local::now().date_naive(),
        };

        let stdout = io::stdout();
        let stderr = io::stderr();
        let mut session = Session::new(
            BudgetService::for_period(period),
            self.format,
            self.quiet,
            stdout.lock(),
            stderr.lock(),
        );

        match &self.script {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("Cannot open script '{}'", path.display()))?;
                session.run(BufReader::new(file))
            }
            None => session.run(io::stdin().lock()),
        }
    }
}

/// A command session over one in-memory budget.
///
/// Lines are executed one at a time; the view is written to `out` after every
/// change and problems with a line are reported on `err` without ending the
/// session.
pub struct Session<W: Write, E: Write> {
    service: BudgetService,
    format: OutputFormat,
    quiet: bool,
    out: W,
    err: E,
}

impl<W: Write, E: Write> Session<W, E> {
    pub fn new(service: BudgetService, format: OutputFormat, quiet: bool, out: W, err: E) -> Self {
        Self {
            service,
            format,
            quiet,
            out,
            err,
        }
    }

    pub fn service(&self) -> &BudgetService {
        &self.service
    }

    pub fn into_writers(self) -> (W, E) {
        (self.out, self.err)
    }

    /// Execute every line of `input` until it ends or a quit command is read.
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<()> {
        for line in input.lines() {
            let line = line.context("Failed to read command")?;
            if self.execute_line(&line)? == LoopControl::Exit {
                break;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    /// Execute a single command line.
    pub fn execute_line(&mut self, line: &str) -> Result<LoopControl> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(LoopControl::Continue);
        }

        let tokens = match shell_words::split(trimmed) {
            Ok(tokens) => tokens,
            Err(err) => {
                writeln!(self.err, "warning: {}", err)?;
                return Ok(LoopControl::Continue);
            }
        };

        let command = match SessionLine::try_parse_from(&tokens) {
            Ok(parsed) => parsed.command,
            Err(err) if err.kind() == ErrorKind::DisplayHelp => {
                write!(self.out, "{}", err.render())?;
                return Ok(LoopControl::Continue);
            }
            Err(err) => {
                write!(self.err, "{}", err.render())?;
                return Ok(LoopControl::Continue);
            }
        };

        debug!(?command, "executing");
        self.dispatch(command)
    }

    fn dispatch(&mut self, command: SessionCommand) -> Result<LoopControl> {
        match command {
            SessionCommand::Add {
                kind,
                description,
                value,
            } => match self.service.submit(EntryInput::new(kind, description, value)) {
                Ok(entry) => {
                    if self.format == OutputFormat::Table {
                        writeln!(self.out, "{}", added_message(&entry))?;
                    }
                    self.print_after_change()?;
                }
                Err(err) => self.reject(err)?,
            },

            SessionCommand::Delete { entry } => match self.service.remove_by_id_str(&entry) {
                Ok(true) => {
                    if self.format == OutputFormat::Table {
                        writeln!(self.out, "Deleted {}", entry)?;
                    }
                    self.print_after_change()?;
                }
                Ok(false) => writeln!(self.err, "note: no entry {}", entry)?,
                Err(err) => self.reject(err)?,
            },

            SessionCommand::Show => self.print_view()?,

            SessionCommand::List => match self.format {
                OutputFormat::Table => write_entries(&mut self.out, &self.service.view())?,
                OutputFormat::Json => self.print_view()?,
            },

            SessionCommand::Quit => return Ok(LoopControl::Exit),
        }

        Ok(LoopControl::Continue)
    }

    fn reject(&mut self, err: AppError) -> io::Result<()> {
        writeln!(self.err, "warning: {}", err)
    }

    fn print_after_change(&mut self) -> Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.print_view()
    }

    fn print_view(&mut self) -> Result<()> {
        let view = self.service.view();
        match self.format {
            OutputFormat::Table => {
                write_view(&mut self.out, &view)?;
                writeln!(self.out)?;
            }
            OutputFormat::Json => {
                writeln!(self.out, "{}", serde_json::to_string(&view)?)?;
            }
        }
        Ok(())
    }
}

fn parse_month(month: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", month.trim()), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}'. Use YYYY-MM", month))
}
