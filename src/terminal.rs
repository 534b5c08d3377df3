//! Line-oriented terminal front end.
//!
//! Status lines go to the writer (stdout in the binary); logs go to stderr.

use crate::games::simon::{
    Color, DisplayPort, Feedback, FeedbackPort, FlashTiming, InputEvent, PresentationPort, Symbol,
    SymbolSet, restart_message,
};
use crossterm::style::{Color as TermColor, Stylize};
use std::io::Write;
use tracing::{debug, warn};

/// One parsed token of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalCommand {
    /// Forward to the controller.
    Input(InputEvent),
    /// Print the current state.
    Status,
    /// Leave the game.
    Quit,
}

/// Parses a line of player input.
///
/// An empty line (Enter) or `start` starts a run; every other word is a
/// symbol. Words outside the set are still forwarded and count as a wrong
/// guess.
pub fn parse_line(line: &str, symbols: &SymbolSet) -> Vec<TerminalCommand> {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() {
        return vec![TerminalCommand::Input(InputEvent::Start)];
    }

    words
        .into_iter()
        .map(|word| match word.to_ascii_lowercase().as_str() {
            "start" => TerminalCommand::Input(InputEvent::Start),
            "status" => TerminalCommand::Status,
            "quit" | "exit" | "q" => TerminalCommand::Quit,
            _ => {
                let symbol = symbols.parse(word).unwrap_or_else(|e| {
                    warn!(error = %e, "Forwarding unknown symbol");
                    Symbol::new(word)
                });
                TerminalCommand::Input(InputEvent::SymbolChosen(symbol))
            }
        })
        .collect()
}

/// Writes the game's cues as styled text lines.
#[derive(Debug)]
pub struct TerminalUi<W> {
    out: W,
    flash: FlashTiming,
}

impl TerminalUi<std::io::Stdout> {
    /// Terminal UI on standard output.
    pub fn stdout(flash: FlashTiming) -> Self {
        Self::new(std::io::stdout(), flash)
    }
}

impl<W: Write> TerminalUi<W> {
    /// Terminal UI writing to `out`.
    pub fn new(out: W, flash: FlashTiming) -> Self {
        Self { out, flash }
    }

    /// Consumes the UI, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: impl std::fmt::Display) {
        if let Err(e) = writeln!(self.out, "{}", text).and_then(|_| self.out.flush()) {
            warn!(error = %e, "Failed to write to terminal");
        }
    }

    fn styled(symbol: &Symbol) -> crossterm::style::StyledContent<String> {
        let text = symbol.name().to_uppercase();
        match symbol.name().parse::<Color>() {
            Ok(Color::Green) => text.with(TermColor::Green),
            Ok(Color::Red) => text.with(TermColor::Red),
            Ok(Color::Yellow) => text.with(TermColor::Yellow),
            Ok(Color::Blue) => text.with(TermColor::Blue),
            Err(_) => text.with(TermColor::White),
        }
    }
}

impl<W: Write> PresentationPort for TerminalUi<W> {
    fn present(&mut self, symbol: &Symbol) {
        debug!(%symbol, flash_ms = self.flash.symbol.as_millis() as u64, "Presenting symbol");
        let styled = Self::styled(symbol).bold();
        self.line(format!("  * {}", styled));
    }

    fn echo(&mut self, symbol: &Symbol) {
        let styled = Self::styled(symbol);
        self.line(format!("  > {}", styled));
    }
}

impl<W: Write> FeedbackPort for TerminalUi<W> {
    fn on_success(&mut self) {
        debug!(flash_ms = self.flash.feedback.as_millis() as u64, style = Feedback::Success.style(), "Feedback");
        self.line(Feedback::Success.message().green().bold());
    }

    fn on_failure(&mut self) {
        debug!(flash_ms = self.flash.feedback.as_millis() as u64, style = Feedback::Failure.style(), "Feedback");
        self.line(Feedback::Failure.message().red().bold());
    }
}

impl<W: Write> DisplayPort for TerminalUi<W> {
    fn show_level(&mut self, level: u32) {
        self.line(format!("Level {}", level).bold());
    }

    fn show_restart_message(&mut self, completed_levels: u32) {
        self.line(restart_message(completed_levels));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_line_starts() {
        let set = SymbolSet::classic();
        assert_eq!(parse_line("   ", &set), vec![TerminalCommand::Input(InputEvent::Start)]);
    }

    #[test]
    fn test_words_become_symbols() {
        let set = SymbolSet::classic();
        let commands = parse_line("Green purple quit", &set);
        assert_eq!(
            commands,
            vec![
                TerminalCommand::Input(InputEvent::SymbolChosen(Color::Green.into())),
                TerminalCommand::Input(InputEvent::SymbolChosen(Symbol::new("purple"))),
                TerminalCommand::Quit,
            ]
        );
    }

    #[test]
    fn test_restart_message_written() {
        let mut ui = TerminalUi::new(Vec::new(), FlashTiming::default());
        ui.show_restart_message(4);
        let text = String::from_utf8(ui.into_inner()).unwrap();
        assert!(text.contains("Completed Levels: 4"));
    }
}
