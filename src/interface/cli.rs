/*!
A prompt for use at a terminal.

Commands:

| Command            | Action                                             |
|--------------------|----------------------------------------------------|
| `core` / `print`   | Show the core                                      |
| `ground`           | Show the ground rules of the core                  |
| `rules`            | Show the rules of the core, with substitutions     |
| `history`          | Show the assertions made                           |
| `ask`              | Ask for a query                                    |
| `assert`           | Assert the values of atoms                         |
| `undo`             | Undo an assertion                                  |
| `save` / `load`    | Save or load assertions                            |
| `disjoint`         | Identify disjoint cores, and fix the first         |
| `help`             | Show the commands                                  |
| `exit` / `quit`    | End the session                                    |

The end of input ends the session.
*/

use std::io::{BufRead, Write};

use crossterm::style::{Color, Stylize};

use crate::{
    debug::history::parse_history,
    interface::{CoreView, UserCommand, UserInterface},
    names::Names,
    structures::{
        atom::Atom,
        literal::{CLiteral, Literal},
        valuation::TruthValue,
    },
    types::err::HistoryError,
};

/// The prompt shown before each command.
pub const PROMPT: &str = "WDB> ";

const HELP: &str = "Commands:
    core     show the core
    ground   show the ground rules of the core
    rules    show the rules of the core, with substitutions
    history  show the assertions made
    ask      ask for a query
    assert   assert the values of atoms
    undo     undo an assertion
    save     save the assertions made to a file
    load     load assertions from a file
    disjoint identify disjoint cores, and fix the first
    help     show this message
    exit     end the session";

/// A terminal interface.
pub struct Cli<'n, R: BufRead, W: Write> {
    names: &'n Names,
    input: R,
    output: W,
    styled: bool,
}

impl<'n, R: BufRead, W: Write> Cli<'n, R, W> {
    pub fn new(names: &'n Names, input: R, output: W) -> Self {
        Cli {
            names,
            input,
            output,
            styled: false,
        }
    }

    /// Styles output with colour.
    pub fn styled(mut self, styled: bool) -> Self {
        self.styled = styled;
        self
    }

    /// The output of the interface.
    pub fn into_output(self) -> W {
        self.output
    }

    fn paint(&self, text: impl std::fmt::Display, color: Color) -> String {
        match self.styled {
            true => text.to_string().with(color).to_string(),
            false => text.to_string(),
        }
    }

    fn say(&mut self, text: impl std::fmt::Display) {
        if writeln!(self.output, "{text}").is_err() {
            log::error!("Unable to write to the interface");
        }
    }

    /// A line of input, without trailing whitespace, or none at the end of input.
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        let prompt = self.paint(prompt, Color::Cyan);
        if write!(self.output, "{prompt}").is_err() || self.output.flush().is_err() {
            log::error!("Unable to write to the interface");
        }

        let mut buffer = String::default();
        match self.input.read_line(&mut buffer) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(buffer.trim_end().to_string()),
        }
    }

    fn literal_string(&self, literal: &CLiteral) -> String {
        format!(
            "{} = {}",
            self.names.display_name(literal.atom()),
            TruthValue::from(literal.polarity())
        )
    }
}

impl<R: BufRead, W: Write> UserInterface for Cli<'_, R, W> {
    fn greet_user(&mut self) {
        let greeting = self.paint("Debugging an incoherent program. Type 'help' for the commands.", Color::Green);
        self.say(greeting);
    }

    fn prompt_command(&mut self) -> UserCommand {
        loop {
            let Some(line) = self.read_line(PROMPT) else {
                return UserCommand::Exit;
            };

            match line.trim() {
                "core" | "print" => return UserCommand::ShowCore,
                "ground" => return UserCommand::ShowCoreGroundRules,
                "rules" => return UserCommand::ShowCoreNonGroundRules,
                "history" => return UserCommand::ShowHistory,
                "ask" => return UserCommand::AskQuery,
                "assert" => return UserCommand::AssertVariable,
                "undo" => return UserCommand::UndoAssertion,
                "save" => return UserCommand::SaveHistory,
                "load" => return UserCommand::LoadHistory,
                "disjoint" => return UserCommand::AnalyzeDisjointCores,
                "exit" | "quit" => return UserCommand::Exit,
                "help" | "" => self.say(HELP),
                other => {
                    let warning = self.paint(format!("Invalid command '{other}'."), Color::Red);
                    self.say(warning);
                    self.say(HELP);
                }
            }
        }
    }

    fn print_core(&mut self, core: &[CLiteral], core_assertions: &[CLiteral], view: CoreView) {
        if core.is_empty() {
            self.say("The core has no rules.");
        }

        for literal in core {
            let atom = literal.atom();
            let line = match view {
                CoreView::Atoms => self.names.display_literal(literal),

                CoreView::GroundRules => match self.names.ground_rule(atom) {
                    Some(rule) => rule,
                    None => self.names.display_literal(literal),
                },

                CoreView::NonGroundRules => match self.names.rule(atom) {
                    Some(rule) => format!("{rule} {}", self.names.substitution(atom)).trim_end().to_string(),
                    None => self.names.display_literal(literal),
                },
            };
            self.say(format!("    {line}"));
        }

        if !core_assertions.is_empty() {
            let heading = self.paint("Assertions in the core:", Color::Yellow);
            self.say(heading);
            for assertion in core_assertions {
                let line = self.literal_string(assertion);
                self.say(format!("    {line}"));
            }
        }
    }

    fn print_history(&mut self, assertions: &[CLiteral]) {
        if assertions.is_empty() {
            self.say("No assertions.");
        }
        for (index, assertion) in assertions.iter().enumerate() {
            let line = self.literal_string(assertion);
            self.say(format!("{index}: {line}"));
        }
    }

    fn query_response(&mut self, ranking: &[Atom]) {
        if ranking.is_empty() {
            return;
        }
        self.say("Candidates, most informative first:");
        for (index, atom) in ranking.iter().enumerate() {
            let name = self.names.display_name(*atom);
            self.say(format!("    {index}: {name}"));
        }
    }

    fn ask_truth_value(&mut self, atom: Atom) -> TruthValue {
        let question = format!("Should '{}' be true in the model? (y/n/skip) ", self.names.display_name(atom));
        loop {
            let Some(answer) = self.read_line(&question) else {
                return TruthValue::Undefined;
            };
            match answer.trim() {
                "y" | "yes" | "true" => return TruthValue::True,
                "n" | "no" | "false" => return TruthValue::False,
                "s" | "skip" => return TruthValue::Undefined,
                _ => {}
            }
        }
    }

    fn ask_history_filename(&mut self) -> String {
        self.read_line("Filename: ").unwrap_or_default().trim().to_string()
    }

    fn get_assertions(&mut self) -> Vec<CLiteral> {
        self.say("Enter assertions as '<name> <true|false>', one per line, and an empty line to finish.");
        let mut assertions = Vec::default();
        loop {
            let Some(line) = self.read_line("  ") else {
                break;
            };
            let line = line.trim();
            if line.is_empty() {
                break;
            }
            match parse_history(line, self.names) {
                Ok(mut parsed) => assertions.append(&mut parsed),
                Err(e) => {
                    let warning = self.paint(format!("Skipped: {e}"), Color::Red);
                    self.say(warning);
                }
            }
        }
        assertions
    }

    fn choose_assertion_to_undo(&mut self, assertions: &[CLiteral]) -> usize {
        self.print_history(assertions);
        if assertions.is_empty() {
            return usize::MAX;
        }
        match self.read_line("Index of the assertion to undo: ") {
            Some(index) => index.trim().parse().unwrap_or(usize::MAX),
            None => usize::MAX,
        }
    }

    fn inform_solving(&mut self) {
        self.say("Solving...");
    }

    fn inform_computing_query_variable(&mut self) {
        self.say("Computing a query...");
    }

    fn inform_saved_history(&mut self, filename: &str) {
        self.say(format!("Saved the assertions to '{filename}'."));
    }

    fn inform_loaded_history(&mut self, filename: &str) {
        self.say(format!("Loaded assertions from '{filename}'."));
    }

    fn inform_could_not_save_history(&mut self, filename: &str, error: &HistoryError) {
        let warning = self.paint(format!("Could not save to '{filename}': {error}."), Color::Red);
        self.say(warning);
    }

    fn inform_could_not_load_history(&mut self, filename: &str, error: &HistoryError) {
        let warning = self.paint(format!("Could not load from '{filename}': {error}."), Color::Red);
        self.say(warning);
    }

    fn inform_analyzed_disjoint_cores(&mut self, count: usize) {
        self.say(format!("Found {count} disjoint cores, fixing the first."));
    }

    fn inform_assertion_already_present(&mut self, atom: Atom) {
        let name = self.names.display_name(atom);
        self.say(format!("'{name}' is already asserted."));
    }

    fn inform_assertion_is_fact(&mut self, atom: Atom) {
        let name = self.names.display_name(atom);
        self.say(format!("'{name}' is a fact, and cannot be asserted."));
    }

    fn inform_program_coherent(&mut self, answer_set: &[Atom]) {
        let heading = self.paint("The program is coherent. Answer set:", Color::Green);
        self.say(heading);
        let atoms: Vec<String> = answer_set
            .iter()
            .filter_map(|atom| self.names.name(*atom).map(|name| name.to_string()))
            .collect();
        self.say(format!("{{ {} }}", atoms.join(", ")));
    }

    fn inform_no_query_possible(&mut self) {
        self.say("No query is possible.");
    }

    fn inform_unfounded_core(&mut self, core_assertions: &[CLiteral]) {
        self.say("The core is unfounded, as each part of the core is an assertion:");
        for assertion in core_assertions {
            let line = self.literal_string(assertion);
            self.say(format!("    {line}"));
        }
    }

    fn inform_incoherent_without_assumptions(&mut self) {
        let warning = self.paint("The program is incoherent without any debug atom.", Color::Red);
        self.say(warning);
    }
}
