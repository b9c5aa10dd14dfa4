#![forbid(unsafe_code)]

//! Human-readable output formatter
//!
//! Prints each field followed by its groups in execution order. Halting
//! groups are marked `bail` and highlighted when color is enabled.

use crate::config::ColorOption;
use crate::engine::CompileResult;
use crate::rules::{CanonicalRule, RegisteredRule};
use std::io;
use termcolor::{Buffer, Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Human-readable output formatter
pub struct HumanFormatter {
    color: ColorChoice,
}

impl HumanFormatter {
    /// Creates a new HumanFormatter
    pub fn new(color: ColorOption) -> Self {
        let color = match color {
            ColorOption::Auto => {
                if io::IsTerminal::is_terminal(&io::stdout()) {
                    ColorChoice::Auto
                } else {
                    ColorChoice::Never
                }
            }
            ColorOption::Always => ColorChoice::Always,
            ColorOption::Never => ColorChoice::Never,
        };
        HumanFormatter { color }
    }

    /// Write a compile result
    pub fn write_plans<W: WriteColor>(&self, out: &mut W, result: &CompileResult) -> io::Result<()> {
        for plan in &result.plans {
            out.set_color(ColorSpec::new().set_bold(true))?;
            writeln!(out, "{}", plan.field)?;
            out.reset()?;

            if plan.groups.is_empty() {
                writeln!(out, "  (no rules)")?;
            }

            for (index, group) in plan.groups.iter().enumerate() {
                write!(out, "  [{}] ", index + 1)?;
                if group.bail {
                    out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
                    write!(out, "bail ")?;
                    out.reset()?;
                } else {
                    write!(out, "     ")?;
                }
                let rules: Vec<String> = group.rules.iter().map(describe_rule).collect();
                writeln!(out, "{}", rules.join(", "))?;
            }
        }

        for error in &result.errors {
            out.set_color(ColorSpec::new().set_bold(true))?;
            writeln!(out, "{}", error.field)?;
            out.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
            writeln!(out, "  error: {}", error.error)?;
            out.reset()?;
        }

        writeln!(out)?;
        if result.is_ok() {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
            writeln!(out, "Compiled {} field(s)", result.plans.len())?;
        } else {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
            writeln!(
                out,
                "Compiled {} field(s), {} failed",
                result.plans.len(),
                result.errors.len()
            )?;
        }
        out.reset()
    }

    /// Write registry entries, one per line
    pub fn write_rules<'a, W: WriteColor>(
        &self,
        out: &mut W,
        rules: impl IntoIterator<Item = &'a RegisteredRule>,
    ) -> io::Result<()> {
        for rule in rules {
            out.set_color(ColorSpec::new().set_bold(true))?;
            write!(out, "{:<12}", rule.name)?;
            out.reset()?;
            writeln!(out, " {:<8} {}", rule.source.as_str(), rule.description)?;
        }
        Ok(())
    }

    /// Render a compile result without color
    pub fn format(&self, result: &CompileResult) -> String {
        let mut buffer = Buffer::no_color();
        // Writing into an in-memory buffer cannot fail.
        let _ = self.write_plans(&mut buffer, result);
        String::from_utf8_lossy(buffer.as_slice()).into_owned()
    }

    /// Write a compile result to stdout
    pub fn write_to_stdout(&self, result: &CompileResult) -> io::Result<()> {
        let mut stdout = StandardStream::stdout(self.color);
        self.write_plans(&mut stdout, result)
    }

    /// Write registry entries to stdout
    pub fn write_rules_to_stdout<'a>(
        &self,
        rules: impl IntoIterator<Item = &'a RegisteredRule>,
    ) -> io::Result<()> {
        let mut stdout = StandardStream::stdout(self.color);
        self.write_rules(&mut stdout, rules)
    }
}

/// `name(arg, arg)` with a leading `^` for prefixed rules
fn describe_rule(rule: &CanonicalRule) -> String {
    let mut text = String::new();
    if rule.modifier.is_bail() {
        text.push('^');
    }
    text.push_str(rule.display_name());
    if !rule.args.is_empty() {
        text.push('(');
        text.push_str(&rule.args.join(", "));
        text.push(')');
    }
    text
}
