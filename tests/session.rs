use std::{
    collections::{BTreeSet, VecDeque},
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use otter_debug::{
    config::{Config, DebugConfig},
    context::Context,
    debug::{
        history::save_history,
        session::{DebugSession, Outcome, SessionState},
    },
    interface::{CoreView, UserCommand, UserInterface},
    names::Names,
    structures::{
        atom::Atom,
        literal::{CLiteral, Literal},
        valuation::TruthValue,
    },
    types::err::HistoryError,
};

fn program_path(name: &str) -> PathBuf {
    Path::new(".").join("tests").join("programs").join(name)
}

fn load(name: &str) -> (Context, Names) {
    let mut the_context = Context::from_config(Config::default());
    let file = File::open(program_path(name)).unwrap();
    let names = the_context.read_debug_dimacs(BufReader::new(file)).unwrap();
    (the_context, names)
}

fn atom(names: &Names, name: &str) -> Atom {
    names.atom(name).unwrap()
}

fn atoms_of(literals: &[CLiteral]) -> BTreeSet<Atom> {
    literals.iter().map(|literal| literal.atom()).collect()
}

/// Things a session told the user.
#[derive(Debug, PartialEq, Eq)]
enum Told {
    Greeted,
    Solving,
    Computing,
    Core(Vec<CLiteral>, Vec<CLiteral>),
    History(Vec<CLiteral>),
    Query(Vec<Atom>),
    Saved(String),
    Loaded(String),
    NotSaved(String),
    NotLoaded(String, HistoryError),
    DisjointCores(usize),
    AlreadyPresent(Atom),
    Fact(Atom),
    Coherent(Vec<Atom>),
    NoQuery,
    Unfounded(Vec<CLiteral>),
    IncoherentWithoutAssumptions,
}

/// A user, following a script.
#[derive(Default)]
struct Script {
    commands: VecDeque<UserCommand>,
    assertions: VecDeque<Vec<CLiteral>>,
    answers: VecDeque<TruthValue>,
    undo: VecDeque<usize>,
    filenames: VecDeque<String>,
    told: Vec<Told>,
}

impl Script {
    fn with_commands(commands: Vec<UserCommand>) -> Self {
        Script {
            commands: commands.into(),
            ..Default::default()
        }
    }

    fn told(&self, told: &Told) -> bool {
        self.told.contains(told)
    }
}

impl UserInterface for Script {
    fn greet_user(&mut self) {
        self.told.push(Told::Greeted);
    }

    fn prompt_command(&mut self) -> UserCommand {
        self.commands.pop_front().unwrap_or(UserCommand::Exit)
    }

    fn print_core(&mut self, core: &[CLiteral], core_assertions: &[CLiteral], _view: CoreView) {
        self.told.push(Told::Core(core.to_vec(), core_assertions.to_vec()));
    }

    fn print_history(&mut self, assertions: &[CLiteral]) {
        self.told.push(Told::History(assertions.to_vec()));
    }

    fn query_response(&mut self, ranking: &[Atom]) {
        self.told.push(Told::Query(ranking.to_vec()));
    }

    fn ask_truth_value(&mut self, _atom: Atom) -> TruthValue {
        self.answers.pop_front().unwrap_or(TruthValue::Undefined)
    }

    fn ask_history_filename(&mut self) -> String {
        self.filenames.pop_front().unwrap_or_default()
    }

    fn get_assertions(&mut self) -> Vec<CLiteral> {
        self.assertions.pop_front().unwrap_or_default()
    }

    fn choose_assertion_to_undo(&mut self, _assertions: &[CLiteral]) -> usize {
        self.undo.pop_front().unwrap_or(usize::MAX)
    }

    fn inform_solving(&mut self) {
        self.told.push(Told::Solving);
    }

    fn inform_computing_query_variable(&mut self) {
        self.told.push(Told::Computing);
    }

    fn inform_saved_history(&mut self, filename: &str) {
        self.told.push(Told::Saved(filename.to_string()));
    }

    fn inform_loaded_history(&mut self, filename: &str) {
        self.told.push(Told::Loaded(filename.to_string()));
    }

    fn inform_could_not_save_history(&mut self, filename: &str, _error: &HistoryError) {
        self.told.push(Told::NotSaved(filename.to_string()));
    }

    fn inform_could_not_load_history(&mut self, filename: &str, error: &HistoryError) {
        self.told.push(Told::NotLoaded(filename.to_string(), error.clone()));
    }

    fn inform_analyzed_disjoint_cores(&mut self, count: usize) {
        self.told.push(Told::DisjointCores(count));
    }

    fn inform_assertion_already_present(&mut self, atom: Atom) {
        self.told.push(Told::AlreadyPresent(atom));
    }

    fn inform_assertion_is_fact(&mut self, atom: Atom) {
        self.told.push(Told::Fact(atom));
    }

    fn inform_program_coherent(&mut self, answer_set: &[Atom]) {
        self.told.push(Told::Coherent(answer_set.to_vec()));
    }

    fn inform_no_query_possible(&mut self) {
        self.told.push(Told::NoQuery);
    }

    fn inform_unfounded_core(&mut self, core_assertions: &[CLiteral]) {
        self.told.push(Told::Unfounded(core_assertions.to_vec()));
    }

    fn inform_incoherent_without_assumptions(&mut self) {
        self.told.push(Told::IncoherentWithoutAssumptions);
    }
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("otter_debug_session_{}_{name}", std::process::id()))
}

mod coherence {
    use super::*;

    #[test]
    fn coherent_program() {
        let (mut the_context, names) = load("coherent.cnf");
        let mut script = Script::default();

        let outcome = {
            let mut session = DebugSession::new(&mut the_context, &names, DebugConfig::default());
            let outcome = session.debug(&mut script).unwrap();
            assert_eq!(session.state(), SessionState::Coherent);
            outcome
        };

        let answer_set = vec![atom(&names, "p(a)"), atom(&names, "q(a)")];
        assert_eq!(outcome, Outcome::Coherent(answer_set.clone()));
        assert!(script.told(&Told::Coherent(answer_set)));
        assert!(script.commands.is_empty());
    }

    #[test]
    fn incoherent_without_debug_atoms() {
        let mut the_context = Context::from_config(Config::default());
        let program = "p cnf 2 2\nc v 1 a\nc v 2 _debug1\nc d _debug1 0 a.\n1 0\n-1 0\n";
        let names = the_context.read_debug_dimacs(program.as_bytes()).unwrap();

        let mut script = Script::default();
        let mut session = DebugSession::new(&mut the_context, &names, DebugConfig::default());

        assert_eq!(session.debug(&mut script), Ok(Outcome::IncoherentWithoutAssumptions));
        assert!(script.told(&Told::IncoherentWithoutAssumptions));
    }
}

mod assertions {
    use super::*;

    #[test]
    fn fact_is_rejected() {
        let (mut the_context, names) = load("chain.cnf");
        let f = atom(&names, "f");

        let mut script = Script::with_commands(vec![UserCommand::AssertVariable, UserCommand::ShowHistory]);
        script.assertions.push_back(vec![CLiteral::new(f, true)]);

        let mut session = DebugSession::new(&mut the_context, &names, DebugConfig::default());
        assert_eq!(session.debug(&mut script), Ok(Outcome::Exited));

        assert!(session.facts().contains(&f));
        assert!(session.assertions().is_empty());
        assert!(script.told(&Told::Fact(f)));
        assert!(script.told(&Told::History(vec![])));
    }

    #[test]
    fn undo_out_of_range_is_a_no_op() {
        let (mut the_context, names) = load("chain.cnf");
        let a = atom(&names, "a");
        let b = atom(&names, "b");

        let mut script = Script::with_commands(vec![
            UserCommand::AssertVariable,
            UserCommand::UndoAssertion,
        ]);
        script.assertions.push_back(vec![CLiteral::new(a, false), CLiteral::new(b, false)]);
        script.undo.push_back(5);

        let mut session = DebugSession::new(&mut the_context, &names, DebugConfig::default());
        assert_eq!(session.debug(&mut script), Ok(Outcome::Exited));
        assert_eq!(session.assertions(), &[CLiteral::new(a, false), CLiteral::new(b, false)]);
    }

    #[test]
    fn duplicate_is_rejected() {
        let (mut the_context, names) = load("chain.cnf");
        let a = atom(&names, "a");

        let mut script = Script::with_commands(vec![UserCommand::AssertVariable, UserCommand::AssertVariable]);
        script.assertions.push_back(vec![CLiteral::new(a, false)]);
        script.assertions.push_back(vec![CLiteral::new(a, true)]);

        let mut session = DebugSession::new(&mut the_context, &names, DebugConfig::default());
        assert_eq!(session.debug(&mut script), Ok(Outcome::Exited));

        assert_eq!(session.assertions(), &[CLiteral::new(a, false)]);
        assert!(script.told(&Told::AlreadyPresent(a)));
    }

    #[test]
    fn core_follows_assertions() {
        let (mut the_context, names) = load("chain.cnf");
        let a = atom(&names, "a");
        let debug1 = atom(&names, "_debug1");

        let mut script = Script::with_commands(vec![UserCommand::AssertVariable, UserCommand::ShowCore]);
        script.assertions.push_back(vec![CLiteral::new(a, false)]);

        let mut session = DebugSession::new(&mut the_context, &names, DebugConfig::default());
        assert_eq!(atoms_of(session.considered()).len(), 3);
        assert_eq!(session.debug(&mut script), Ok(Outcome::Exited));

        // a :- f. with a false.
        assert_eq!(atoms_of(session.core()), BTreeSet::from([a, debug1]));
        assert!(script.told(&Told::Core(
            vec![CLiteral::new(debug1, true)],
            vec![CLiteral::new(a, false)]
        )));
    }
}

mod queries {
    use super::*;

    #[test]
    fn answered_query_is_asserted() {
        let (mut the_context, names) = load("chain.cnf");
        let a = atom(&names, "a");
        let b = atom(&names, "b");

        let mut script = Script::with_commands(vec![UserCommand::AskQuery]);
        script.answers.push_back(TruthValue::False);

        let mut session = DebugSession::new(&mut the_context, &names, DebugConfig::default());
        assert_eq!(session.debug(&mut script), Ok(Outcome::Exited));

        assert!(script.told(&Told::Query(vec![a, b])));
        assert_eq!(session.assertions(), &[CLiteral::new(a, false)]);
        assert_eq!(session.state(), SessionState::Exited);
    }

    #[test]
    fn declined_query_changes_nothing() {
        let (mut the_context, names) = load("chain.cnf");

        let mut script = Script::with_commands(vec![UserCommand::AskQuery]);
        script.answers.push_back(TruthValue::Undefined);

        let mut session = DebugSession::new(&mut the_context, &names, DebugConfig::default());
        assert_eq!(session.debug(&mut script), Ok(Outcome::Exited));
        assert!(session.assertions().is_empty());
        assert_eq!(session.core().len(), 3);
    }

    #[test]
    fn unfounded_core() {
        let (mut the_context, names) = load("chain.cnf");
        let b = atom(&names, "b");
        let debug3 = atom(&names, "_debug3");

        let mut script = Script::with_commands(vec![
            UserCommand::AssertVariable,
            UserCommand::AskQuery,
            UserCommand::UndoAssertion,
        ]);
        script.assertions.push_back(vec![CLiteral::new(b, true)]);
        script.undo.push_back(0);

        let mut session = DebugSession::new(&mut the_context, &names, DebugConfig::default());
        assert_eq!(session.debug(&mut script), Ok(Outcome::Exited));

        // b together with :- b. is made only of assertions.
        let unfounded = script.told.iter().any(|told| match told {
            Told::Unfounded(core_assertions) => {
                core_assertions.contains(&CLiteral::new(b, true))
                    && core_assertions.contains(&CLiteral::new(b, false))
            }
            _ => false,
        });
        assert!(unfounded);
        assert!(!script.told.iter().any(|told| matches!(told, Told::Query(_))));

        // After the undo the core is the full chain.
        assert!(session.assertions().is_empty());
        assert!(atoms_of(session.core()).contains(&debug3));
        assert_eq!(session.core().len(), 3);
    }
}

mod disjoint {
    use super::*;

    #[test]
    fn fixes_the_first_core() {
        let (mut the_context, names) = load("disjoint.cnf");

        let mut script = Script::with_commands(vec![UserCommand::AnalyzeDisjointCores]);
        let mut session = DebugSession::new(&mut the_context, &names, DebugConfig::default());
        assert_eq!(session.debug(&mut script), Ok(Outcome::Exited));

        assert!(script.told(&Told::DisjointCores(2)));
        assert_eq!(session.considered().len(), 2);
        assert_eq!(atoms_of(session.core()), atoms_of(session.considered()));
    }
}

mod history {
    use super::*;

    #[test]
    fn save_then_load() {
        let (mut the_context, names) = load("chain.cnf");
        let a = atom(&names, "a");
        let path = temp_path("save_then_load");
        let filename = path.to_string_lossy().to_string();

        let mut script = Script::with_commands(vec![
            UserCommand::AssertVariable,
            UserCommand::SaveHistory,
            UserCommand::UndoAssertion,
            UserCommand::LoadHistory,
        ]);
        script.assertions.push_back(vec![CLiteral::new(a, false)]);
        script.undo.push_back(0);
        script.filenames.push_back(filename.clone());
        script.filenames.push_back(filename.clone());

        let mut session = DebugSession::new(&mut the_context, &names, DebugConfig::default());
        assert_eq!(session.debug(&mut script), Ok(Outcome::Exited));

        assert!(script.told(&Told::Saved(filename.clone())));
        assert!(script.told(&Told::Loaded(filename)));
        assert_eq!(session.assertions(), &[CLiteral::new(a, false)]);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn failed_load_changes_nothing() {
        let (mut the_context, names) = load("chain.cnf");
        let path = temp_path("failed_load");
        assert!(std::fs::write(&path, "a false\nz true\n").is_ok());
        let filename = path.to_string_lossy().to_string();

        let mut script = Script::with_commands(vec![UserCommand::LoadHistory]);
        script.filenames.push_back(filename.clone());

        let mut session = DebugSession::new(&mut the_context, &names, DebugConfig::default());
        assert_eq!(session.debug(&mut script), Ok(Outcome::Exited));

        assert!(session.assertions().is_empty());
        assert!(script.told(&Told::NotLoaded(
            filename,
            HistoryError::UnknownName(2, "z".to_string())
        )));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn preloaded() {
        let (mut the_context, names) = load("chain.cnf");
        let a = atom(&names, "a");
        let f = atom(&names, "f");
        let path = temp_path("preloaded");
        assert!(save_history(&path, &[CLiteral::new(f, true), CLiteral::new(a, false)], &names).is_ok());

        let loaded = otter_debug::debug::history::load_history(&path, &names).unwrap();

        let mut script = Script::default();
        let mut session = DebugSession::new(&mut the_context, &names, DebugConfig::default());
        session.preload_assertions(loaded);
        assert_eq!(session.debug(&mut script), Ok(Outcome::Exited));

        assert!(script.told(&Told::Fact(f)));
        assert_eq!(session.assertions(), &[CLiteral::new(a, false)]);
        let _ = std::fs::remove_file(&path);
    }
}
