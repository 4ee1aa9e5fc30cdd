/*!
Interaction with a user during a debug session.

A [session](crate::debug::session) drives a [UserInterface], prompting for commands and informing of results.
Two interfaces are provided:
- [Cli](cli::Cli), a prompt for use at a terminal.
- [Wire](wire::Wire), a line based protocol for use by some other program, e.g. a graphical interface.

Both are generic over the source of input and the destination of output.
*/

pub mod cli;
pub mod wire;

use crate::{
    structures::{atom::Atom, literal::CLiteral, valuation::TruthValue},
    types::err::HistoryError,
};

/// Commands available to a user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserCommand {
    /// Show the (minimized) core.
    ShowCore,

    /// Show the ground rules of the core.
    ShowCoreGroundRules,

    /// Show the rules of the core, with substitutions.
    ShowCoreNonGroundRules,

    /// Show the assertions made.
    ShowHistory,

    /// Ask for a query.
    AskQuery,

    /// Save the assertions made to a file.
    SaveHistory,

    /// Load assertions from a file.
    LoadHistory,

    /// Assert the value of some atoms.
    AssertVariable,

    /// Undo an assertion.
    UndoAssertion,

    /// Identify disjoint cores, and fix the first.
    AnalyzeDisjointCores,

    /// End the session.
    Exit,
}

/// How to show a core.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoreView {
    /// The debug atoms of the core.
    Atoms,

    /// The ground rule of each debug atom.
    GroundRules,

    /// The rule of each debug atom, together with the substitution of the atom.
    NonGroundRules,
}

/// Methods to interact with a user.
pub trait UserInterface {
    fn greet_user(&mut self);

    /// A command from the user.
    ///
    /// If no further command is available (e.g. at the end of input) the command is [Exit](UserCommand::Exit).
    fn prompt_command(&mut self) -> UserCommand;

    /// Shows a core, split into the literals of the core which are not assertions and the assertions of the core.
    fn print_core(&mut self, core: &[CLiteral], core_assertions: &[CLiteral], view: CoreView);

    fn print_history(&mut self, assertions: &[CLiteral]);

    /// Shows the candidates of a query, with the most informative candidate first.
    fn query_response(&mut self, ranking: &[Atom]);

    /// The value of an atom, according to the user.
    ///
    /// [Undefined](TruthValue::Undefined) if the user declines to answer.
    fn ask_truth_value(&mut self, atom: Atom) -> TruthValue;

    fn ask_history_filename(&mut self) -> String;

    /// Assertions from the user.
    fn get_assertions(&mut self) -> Vec<CLiteral>;

    /// The index of an assertion to undo.
    ///
    /// An index out of range undoes nothing.
    fn choose_assertion_to_undo(&mut self, assertions: &[CLiteral]) -> usize;

    fn inform_solving(&mut self);

    fn inform_computing_query_variable(&mut self);

    fn inform_saved_history(&mut self, filename: &str);

    fn inform_loaded_history(&mut self, filename: &str);

    fn inform_could_not_save_history(&mut self, filename: &str, error: &HistoryError);

    fn inform_could_not_load_history(&mut self, filename: &str, error: &HistoryError);

    fn inform_analyzed_disjoint_cores(&mut self, count: usize);

    fn inform_assertion_already_present(&mut self, atom: Atom);

    fn inform_assertion_is_fact(&mut self, atom: Atom);

    /// The program is coherent, with the given (non-debug) atoms true.
    fn inform_program_coherent(&mut self, answer_set: &[Atom]);

    fn inform_no_query_possible(&mut self);

    /// The core is unfounded, i.e. made only of assertions.
    fn inform_unfounded_core(&mut self, core_assertions: &[CLiteral]);

    /// The program is incoherent without any debug atom.
    fn inform_incoherent_without_assumptions(&mut self);
}
