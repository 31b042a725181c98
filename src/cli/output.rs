//! Colored terminal output for the command line front end.
//!
//! Progress and success go to stdout, warnings and errors to stderr.
//! `quiet` suppresses everything except errors; `verbose` enables detail lines.
//! Color is used only when the stream is a terminal.

use cyrup_termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use is_terminal::IsTerminal;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy)]
enum Target {
    Stdout,
    Stderr,
}

/// Output manager honoring the verbose and quiet flags.
#[derive(Debug, Clone, Copy)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
    stdout_color: ColorChoice,
    stderr_color: ColorChoice,
}

impl OutputManager {
    /// Creates an output manager, detecting whether each stream is a terminal.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            stdout_color: color_choice(io::stdout().is_terminal()),
            stderr_color: color_choice(io::stderr().is_terminal()),
        }
    }

    /// Whether detail lines are printed.
    pub fn is_verbose(&self) -> bool {
        self.verbose && !self.quiet
    }

    /// Detail line, verbose mode only.
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if self.is_verbose() {
            self.line(Target::Stdout, "  ", None, message)?;
        }
        Ok(())
    }

    /// Step progress line.
    pub fn progress(&self, message: &str) -> io::Result<()> {
        if !self.quiet {
            self.line(Target::Stdout, "→", Some(Color::Cyan), message)?;
        }
        Ok(())
    }

    /// Success line.
    pub fn success(&self, message: &str) -> io::Result<()> {
        if !self.quiet {
            self.line(Target::Stdout, "✓", Some(Color::Green), message)?;
        }
        Ok(())
    }

    /// Warning line on stderr.
    pub fn warn(&self, message: &str) -> io::Result<()> {
        if !self.quiet {
            self.line(Target::Stderr, "⚠", Some(Color::Yellow), message)?;
        }
        Ok(())
    }

    /// Error line on stderr, printed even in quiet mode.
    pub fn error(&self, message: &str) -> io::Result<()> {
        self.line(Target::Stderr, "✗", Some(Color::Red), message)
    }

    /// Recovery hint on stderr, printed even in quiet mode.
    pub fn hint(&self, message: &str) -> io::Result<()> {
        self.line(Target::Stderr, "  hint:", Some(Color::Blue), message)
    }

    /// Section header.
    pub fn section(&self, title: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut out = self.stream(Target::Stdout);
        writeln!(out)?;
        out.set_color(ColorSpec::new().set_bold(true))?;
        writeln!(out, "{}", title)?;
        out.reset()?;
        writeln!(out, "{}", "─".repeat(title.chars().count()))
    }

    /// Indented line.
    pub fn indent(&self, message: &str) -> io::Result<()> {
        if !self.quiet {
            self.line(Target::Stdout, "   ", None, message)?;
        }
        Ok(())
    }

    fn stream(&self, target: Target) -> StandardStream {
        match target {
            Target::Stdout => StandardStream::stdout(self.stdout_color),
            Target::Stderr => StandardStream::stderr(self.stderr_color),
        }
    }

    fn line(&self, target: Target, marker: &str, color: Option<Color>, message: &str) -> io::Result<()> {
        let mut out = self.stream(target);
        if let Some(color) = color {
            out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
        }
        write!(out, "{}", marker)?;
        out.reset()?;
        writeln!(out, " {}", message)
    }
}

fn color_choice(is_terminal: bool) -> ColorChoice {
    if is_terminal {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}
