/*!
A line based protocol, for use by some other program.

Each request is a single line, and each response is a single line.

Requests:

| Request                        | Command                                     |
|--------------------------------|---------------------------------------------|
| `get:core`                     | Show the core                               |
| `get:core:ground`              | Show the ground rules of the core           |
| `get:core:nonground`           | Show the rules of the core                  |
| `get:history`                  | Show the assertions made                    |
| `get:query`                    | Ask for a query                             |
| `set:assertion:<name>:<value>` | Assert `<name>` to have value `true`/`false` |
| `undo:<index>`                 | Undo the assertion at `<index>`             |
| `save:<file>` / `load:<file>`  | Save or load assertions                     |
| `get:disjoint`                 | Identify disjoint cores, and fix the first  |
| `exit`                         | End the session                             |

Responses are prefixed with `response:`, questions with `request:`, information with `info:`, and problems with a request with `error:`.
The items of a response are separated by `;`.
A core is sent as two responses: `response:core:` with the rules of the core, then `response:core-assertions:` with the assertions of the core.

When a query is asked, a `request:truthvalue:<name>` line is written, and the next line read is the answer: `true`, `false`, or anything else to decline.
*/

use std::io::{BufRead, Write};

use crate::{
    interface::{CoreView, UserCommand, UserInterface},
    names::Names,
    structures::{
        atom::Atom,
        literal::{CLiteral, Literal},
        valuation::TruthValue,
    },
    types::err::HistoryError,
};

/// An interface over lines of requests and responses.
pub struct Wire<'n, R: BufRead, W: Write> {
    names: &'n Names,
    input: R,
    output: W,

    pending_assertions: Vec<CLiteral>,
    pending_undo: usize,
    pending_filename: String,
}

impl<'n, R: BufRead, W: Write> Wire<'n, R, W> {
    pub fn new(names: &'n Names, input: R, output: W) -> Self {
        Wire {
            names,
            input,
            output,
            pending_assertions: Vec::default(),
            pending_undo: usize::MAX,
            pending_filename: String::default(),
        }
    }

    /// The output of the interface.
    pub fn into_output(self) -> W {
        self.output
    }

    fn send(&mut self, line: impl std::fmt::Display) {
        if writeln!(self.output, "{line}").and_then(|_| self.output.flush()).is_err() {
            log::error!("Unable to write to the interface");
        }
    }

    fn receive(&mut self) -> Option<String> {
        let mut buffer = String::default();
        match self.input.read_line(&mut buffer) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(buffer.trim_end().to_string()),
        }
    }

    fn literal_item(&self, literal: &CLiteral) -> String {
        format!(
            "{}={}",
            self.names.display_name(literal.atom()),
            TruthValue::from(literal.polarity())
        )
    }

    /// Reads an assertion request of the form `<name>:<value>`.
    fn read_assertion(&self, request: &str) -> Result<CLiteral, String> {
        let Some((name, value)) = request.rsplit_once(':') else {
            return Err(format!("error:malformed-assertion:{request}"));
        };
        let Some(atom) = self.names.atom(name) else {
            return Err(format!("error:unknown-atom:{name}"));
        };
        match value.parse::<TruthValue>() {
            Ok(TruthValue::True) => Ok(CLiteral::new(atom, true)),
            Ok(TruthValue::False) => Ok(CLiteral::new(atom, false)),
            _ => Err(format!("error:unknown-value:{value}")),
        }
    }
}

impl<R: BufRead, W: Write> UserInterface for Wire<'_, R, W> {
    fn greet_user(&mut self) {
        self.send("info:ready");
    }

    fn prompt_command(&mut self) -> UserCommand {
        loop {
            let Some(request) = self.receive() else {
                return UserCommand::Exit;
            };

            match request.as_str() {
                "get:core" => return UserCommand::ShowCore,
                "get:core:ground" => return UserCommand::ShowCoreGroundRules,
                "get:core:nonground" => return UserCommand::ShowCoreNonGroundRules,
                "get:history" => return UserCommand::ShowHistory,
                "get:query" => return UserCommand::AskQuery,
                "get:disjoint" => return UserCommand::AnalyzeDisjointCores,
                "exit" => return UserCommand::Exit,
                _ => {}
            }

            if let Some(assertion) = request.strip_prefix("set:assertion:") {
                match self.read_assertion(assertion) {
                    Ok(literal) => {
                        self.pending_assertions = vec![literal];
                        return UserCommand::AssertVariable;
                    }
                    Err(error) => self.send(error),
                }
            } else if let Some(index) = request.strip_prefix("undo:") {
                match index.parse::<usize>() {
                    Ok(index) => {
                        self.pending_undo = index;
                        return UserCommand::UndoAssertion;
                    }
                    Err(_) => self.send(format!("error:malformed-index:{index}")),
                }
            } else if let Some(filename) = request.strip_prefix("save:") {
                self.pending_filename = filename.to_string();
                return UserCommand::SaveHistory;
            } else if let Some(filename) = request.strip_prefix("load:") {
                self.pending_filename = filename.to_string();
                return UserCommand::LoadHistory;
            } else {
                self.send(format!("error:unknown-command:{request}"));
            }
        }
    }

    fn print_core(&mut self, core: &[CLiteral], core_assertions: &[CLiteral], view: CoreView) {
        let items: Vec<String> = core
            .iter()
            .map(|literal| {
                let atom = literal.atom();
                match view {
                    CoreView::Atoms => self.names.display_literal(literal),
                    CoreView::GroundRules => self
                        .names
                        .ground_rule(atom)
                        .unwrap_or_else(|| self.names.display_literal(literal)),
                    CoreView::NonGroundRules => match self.names.rule(atom) {
                        Some(rule) => format!("{rule} {}", self.names.substitution(atom)).trim_end().to_string(),
                        None => self.names.display_literal(literal),
                    },
                }
            })
            .collect();
        self.send(format!("response:core:{}", items.join(";")));

        let assertions: Vec<String> = core_assertions.iter().map(|assertion| self.literal_item(assertion)).collect();
        self.send(format!("response:core-assertions:{}", assertions.join(";")));
    }

    fn print_history(&mut self, assertions: &[CLiteral]) {
        let items: Vec<String> = assertions.iter().map(|assertion| self.literal_item(assertion)).collect();
        self.send(format!("response:history:{}", items.join(";")));
    }

    fn query_response(&mut self, ranking: &[Atom]) {
        let items: Vec<String> = ranking.iter().map(|atom| self.names.display_name(*atom)).collect();
        self.send(format!("response:query:{}", items.join(";")));
    }

    fn ask_truth_value(&mut self, atom: Atom) -> TruthValue {
        let name = self.names.display_name(atom);
        self.send(format!("request:truthvalue:{name}"));
        match self.receive() {
            Some(answer) => answer.trim().parse().unwrap_or(TruthValue::Undefined),
            None => TruthValue::Undefined,
        }
    }

    fn ask_history_filename(&mut self) -> String {
        std::mem::take(&mut self.pending_filename)
    }

    fn get_assertions(&mut self) -> Vec<CLiteral> {
        std::mem::take(&mut self.pending_assertions)
    }

    fn choose_assertion_to_undo(&mut self, _assertions: &[CLiteral]) -> usize {
        std::mem::replace(&mut self.pending_undo, usize::MAX)
    }

    fn inform_solving(&mut self) {
        self.send("info:solving");
    }

    fn inform_computing_query_variable(&mut self) {
        self.send("info:computing-query");
    }

    fn inform_saved_history(&mut self, filename: &str) {
        self.send(format!("info:saved:{filename}"));
    }

    fn inform_loaded_history(&mut self, filename: &str) {
        self.send(format!("info:loaded:{filename}"));
    }

    fn inform_could_not_save_history(&mut self, filename: &str, error: &HistoryError) {
        self.send(format!("info:could-not-save:{filename}:{error}"));
    }

    fn inform_could_not_load_history(&mut self, filename: &str, error: &HistoryError) {
        self.send(format!("info:could-not-load:{filename}:{error}"));
    }

    fn inform_analyzed_disjoint_cores(&mut self, count: usize) {
        self.send(format!("info:disjoint-cores:{count}"));
    }

    fn inform_assertion_already_present(&mut self, atom: Atom) {
        let name = self.names.display_name(atom);
        self.send(format!("info:assertion-present:{name}"));
    }

    fn inform_assertion_is_fact(&mut self, atom: Atom) {
        let name = self.names.display_name(atom);
        self.send(format!("info:assertion-is-fact:{name}"));
    }

    fn inform_program_coherent(&mut self, answer_set: &[Atom]) {
        let items: Vec<String> = answer_set.iter().map(|atom| self.names.display_name(*atom)).collect();
        self.send(format!("info:coherent:{}", items.join(";")));
    }

    fn inform_no_query_possible(&mut self) {
        self.send("info:no-query");
    }

    fn inform_unfounded_core(&mut self, core_assertions: &[CLiteral]) {
        let items: Vec<String> = core_assertions.iter().map(|assertion| self.literal_item(assertion)).collect();
        self.send(format!("info:unfounded:{}", items.join(";")));
    }

    fn inform_incoherent_without_assumptions(&mut self) {
        self.send("info:incoherent-without-assumptions");
    }
}

#[cfg(test)]
mod wire_tests {
    use super::*;

    fn names() -> Names {
        let mut names = Names::default();
        let _ = names.insert_name(1, "a");
        let _ = names.insert_name(2, "_debug1");
        names
    }

    #[test]
    fn requests() {
        let names = names();
        let input = "get:core\nbogus\nset:assertion:a:false\nundo:0\nsave:out.txt\n".as_bytes();
        let mut wire = Wire::new(&names, input, Vec::<u8>::new());

        assert_eq!(wire.prompt_command(), UserCommand::ShowCore);
        assert_eq!(wire.prompt_command(), UserCommand::AssertVariable);
        assert_eq!(wire.get_assertions(), vec![CLiteral::new(1, false)]);
        assert_eq!(wire.prompt_command(), UserCommand::UndoAssertion);
        assert_eq!(wire.choose_assertion_to_undo(&[]), 0);
        assert_eq!(wire.prompt_command(), UserCommand::SaveHistory);
        assert_eq!(wire.ask_history_filename(), "out.txt");
        assert_eq!(wire.prompt_command(), UserCommand::Exit);

        let output = String::from_utf8(wire.into_output()).unwrap_or_default();
        assert_eq!(output, "error:unknown-command:bogus\n");
    }

    #[test]
    fn truth_values() {
        let names = names();
        let input = "true\nmaybe\n".as_bytes();
        let mut wire = Wire::new(&names, input, Vec::<u8>::new());

        assert_eq!(wire.ask_truth_value(1), TruthValue::True);
        assert_eq!(wire.ask_truth_value(1), TruthValue::Undefined);
        assert_eq!(wire.ask_truth_value(1), TruthValue::Undefined);

        let output = String::from_utf8(wire.into_output()).unwrap_or_default();
        assert_eq!(output.lines().count(), 3);
        assert!(output.starts_with("request:truthvalue:a\n"));
    }

    #[test]
    fn core_and_assertions_are_separate() {
        let names = names();
        let mut wire = Wire::new(&names, "".as_bytes(), Vec::<u8>::new());

        wire.print_core(&[CLiteral::new(2, true)], &[CLiteral::new(1, false)], CoreView::Atoms);
        wire.print_core(&[CLiteral::new(2, true)], &[], CoreView::Atoms);

        let output = String::from_utf8(wire.into_output()).unwrap_or_default();
        assert_eq!(
            output,
            "response:core:_debug1\nresponse:core-assertions:a=false\nresponse:core:_debug1\nresponse:core-assertions:\n"
        );
    }
}
