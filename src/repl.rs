use crate::commands::Catalog;
use crate::config::Config;
use crate::error::{CalcError, CalcResult};
use crate::format::{history_listing, Computation};
use crate::session::Session;
use crate::utils::{parse_choice, TextUtils};
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use nu_ansi_term::{Color, Style};
use reedline::{Prompt, PromptEditMode, PromptHistorySearch, Reedline, Signal};
use std::borrow::Cow;
use std::io::stdout;

const BANNER_WIDTH: usize = 36;

/// Entries of the main menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainChoice {
    Basic,
    Scientific,
    Evaluate,
    History,
    Exit,
}

const MAIN_MENU: [(u8, &str, MainChoice); 5] = [
    (1, "Basic Operations", MainChoice::Basic),
    (2, "Scientific Operations", MainChoice::Scientific),
    (3, "Evaluate Expression", MainChoice::Evaluate),
    (4, "View History", MainChoice::History),
    (5, "Exit", MainChoice::Exit),
];

impl MainChoice {
    pub fn from_code(code: u8) -> Option<Self> {
        MAIN_MENU
            .iter()
            .find(|(candidate, _, _)| *candidate == code)
            .map(|(_, _, choice)| *choice)
    }
}

/// What the user typed at a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Line(String),
    /// Ctrl-C: leave the current menu
    Back,
    /// Ctrl-D: leave the program
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct CalcPrompt {
    label: String,
}

impl CalcPrompt {
    fn new() -> Self {
        Self {
            label: String::new(),
        }
    }

    fn set_label(&mut self, label: &str) {
        self.label = label.to_string();
    }
}

impl Prompt for CalcPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.label)
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _edit_mode: PromptEditMode) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed("... ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        _history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        Cow::Borrowed("(search) ")
    }
}

pub struct ReplEngine {
    session: Session,
    editor: Reedline,
    prompt: CalcPrompt,
}

impl ReplEngine {
    pub fn new(config: Config) -> CalcResult<Self> {
        Ok(Self {
            session: Session::new(config),
            editor: Reedline::create(),
            prompt: CalcPrompt::new(),
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn run_interactive(&mut self) -> CalcResult<()> {
        if self.config().ui.greeting {
            println!("... Welcome to a calculating life ...");
        }

        loop {
            self.clear_screen()?;
            println!("{}", self.main_menu_text());

            let label = self.config().ui.choice_prompt.clone();
            let line = match self.read_input(&label)? {
                Input::Line(line) => line,
                Input::Back | Input::Quit => break,
            };
            if line.trim().is_empty() {
                continue;
            }

            let choice = match parse_choice(&line).and_then(MainChoice::from_code) {
                Some(choice) => choice,
                None => {
                    self.report_error(&CalcError::unknown_choice(line.trim()));
                    continue;
                }
            };

            let flow = match choice {
                MainChoice::Basic => self.run_catalog(Catalog::Basic)?,
                MainChoice::Scientific => self.run_catalog(Catalog::Scientific)?,
                MainChoice::Evaluate => self.run_expression()?,
                MainChoice::History => {
                    self.clear_screen()?;
                    self.show_history();
                    self.pause()?
                }
                MainChoice::Exit => Flow::Quit,
            };

            if flow == Flow::Quit {
                break;
            }
        }

        if self.config().ui.greeting {
            println!("... See you soon again ...");
        }
        Ok(())
    }

    fn config(&self) -> &Config {
        self.session.config()
    }

    fn run_catalog(&mut self, catalog: Catalog) -> CalcResult<Flow> {
        loop {
            self.clear_screen()?;
            println!("{}", self.session.registry(catalog).menu_text());

            let label = self.config().ui.choice_prompt.clone();
            let line = match self.read_input(&label)? {
                Input::Line(line) => line,
                Input::Back => return Ok(Flow::Continue),
                Input::Quit => return Ok(Flow::Quit),
            };

            let code = match parse_choice(&line) {
                Some(0) => return Ok(Flow::Continue),
                Some(code) if self.session.registry(catalog).has_operation(code) => code,
                _ => {
                    if !line.trim().is_empty() {
                        self.report_error(&CalcError::unknown_choice(line.trim()));
                    }
                    continue;
                }
            };

            let prompt = match self.session.registry(catalog).get(code) {
                Some(info) => info.prompt.clone(),
                None => continue,
            };
            let operands = match self.read_input(&prompt)? {
                Input::Line(operands) => operands,
                Input::Back => continue,
                Input::Quit => return Ok(Flow::Quit),
            };

            let result = self.session.run(catalog, code, &operands);
            self.report(result)?;
            if self.pause()? == Flow::Quit {
                return Ok(Flow::Quit);
            }
        }
    }

    fn run_expression(&mut self) -> CalcResult<Flow> {
        let expression = match self.read_input("Enter expression: ")? {
            Input::Line(expression) => expression,
            Input::Back => return Ok(Flow::Continue),
            Input::Quit => return Ok(Flow::Quit),
        };
        let result = self.session.evaluate(&expression);
        self.report(result)?;
        self.pause()
    }

    fn show_history(&self) {
        let history = self.session.history();
        if history.is_empty() {
            println!("📭 No history yet");
            return;
        }
        println!("{}", self.paint(Style::new().bold(), "--- Calculation History ---"));
        for line in history_listing(history) {
            println!("{}", line);
        }
    }

    /// Print a result or a recoverable error; anything else is returned.
    fn report(&self, result: CalcResult<Computation>) -> CalcResult<()> {
        match result {
            Ok(computation) => {
                let value = computation.value.to_string();
                println!("Result: {}", self.paint(Color::Green.bold(), &value));
                Ok(())
            }
            Err(e) if e.is_recoverable() => {
                self.report_error(&e);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn report_error(&self, error: &CalcError) {
        eprintln!("{}", self.paint(Color::Red.normal(), &format!("❌ {}", error)));
    }

    fn paint(&self, style: Style, text: &str) -> String {
        if self.config().ui.color {
            style.paint(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn pause(&mut self) -> CalcResult<Flow> {
        if !self.config().ui.pause_after_result {
            return Ok(Flow::Continue);
        }
        match self.read_input("\nPress Enter to continue...")? {
            Input::Quit => Ok(Flow::Quit),
            _ => Ok(Flow::Continue),
        }
    }

    fn clear_screen(&self) -> CalcResult<()> {
        if self.config().ui.clear_screen {
            execute!(stdout(), Clear(ClearType::All), MoveTo(0, 0))?;
        }
        Ok(())
    }

    fn read_input(&mut self, label: &str) -> CalcResult<Input> {
        self.prompt.set_label(label);
        match self.editor.read_line(&self.prompt) {
            Ok(Signal::Success(buffer)) => Ok(Input::Line(buffer)),
            Ok(Signal::CtrlC) => Ok(Input::Back),
            Ok(Signal::CtrlD) => Ok(Input::Quit),
            Err(e) => Err(CalcError::repl(format!("Failed to read input: {}", e))),
        }
    }

    fn main_menu_text(&self) -> String {
        let rule = TextUtils::rule(BANNER_WIDTH);
        let mut text = format!(
            "{}\n{}\n{}\n",
            rule,
            TextUtils::center(&self.config().ui.title, BANNER_WIDTH),
            rule
        );
        for (code, label, _) in MAIN_MENU.iter() {
            text.push_str(&format!("{}. {}\n", code, label));
        }
        text.push_str(&rule);
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> ReplEngine {
        let mut config = Config::default();
        config.ui.color = false;
        ReplEngine::new(config).unwrap()
    }

    #[test]
    fn test_repl_creation() {
        let repl = engine();
        assert!(repl.session().history().is_empty());
    }

    #[test]
    fn test_main_choice_lookup() {
        assert_eq!(MainChoice::from_code(1), Some(MainChoice::Basic));
        assert_eq!(MainChoice::from_code(3), Some(MainChoice::Evaluate));
        assert_eq!(MainChoice::from_code(5), Some(MainChoice::Exit));
        assert_eq!(MainChoice::from_code(0), None);
        assert_eq!(MainChoice::from_code(6), None);
    }

    #[test]
    fn test_main_menu_text() {
        let text = engine().main_menu_text();
        assert!(text.contains("SCIENTIFIC CALCULATOR"));
        assert!(text.contains("3. Evaluate Expression"));
        assert!(text.contains("5. Exit"));
    }

    #[test]
    fn test_report_keeps_going_on_recoverable_errors() {
        let mut repl = engine();
        let failed = repl.session.evaluate("1 / 0");
        assert!(repl.report(failed).is_ok());
        assert!(repl.report(Err(CalcError::repl("terminal gone"))).is_err());
    }

    #[test]
    fn test_paint_without_color() {
        let repl = engine();
        assert_eq!(repl.paint(Color::Green.bold(), "4.0"), "4.0");
    }
}
