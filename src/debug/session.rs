/*!
A debug session.

# Overview

A session begins by solving the program with each debug atom assumed.
If the program is coherent there is nothing to debug.
Otherwise, the facts of the program are noted, the core of the solve is minimized, and the session prompts a user for commands until the program becomes coherent (on the assertions of the user) or the user exits.

```none
Init → CheckingCoherence → Coherent
                         → Interactive → Coherent
                                       → Exited
```

# Assertions

Each solve of the session is made with the assertions of the user first, followed by the debug literals under consideration.
An assertion on an atom already asserted, or on a fact, is rejected and reported without any change to the session.
After any change to the assertions (or to the debug literals under consideration) the program is solved again, and the core recomputed.

# Assertion constraints

Some debug atoms relax a constraint on a single literal, e.g. `:- not a.`
These are treated as assertions made by the program, and shown with the assertions of a core.
A core made only of assertions is unfounded, and no query is made for an unfounded core.
*/

use std::collections::BTreeSet;

use crate::{
    config::DebugConfig,
    debug::{
        adapter::SolverAdapter,
        contains_atom,
        disjoint::{compute_disjoint_cores, fix_core},
        history::{load_history, save_history},
        query::QuerySelector,
        quickxplain::QuickXPlain,
        union,
    },
    interface::{CoreView, UserCommand, UserInterface},
    misc::log::targets::{self},
    names::Names,
    reports::Report,
    structures::{
        atom::Atom,
        literal::{CLiteral, Literal},
        valuation::TruthValue,
    },
    types::err::{self, ErrorKind},
};

/// The state of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Init,
    CheckingCoherence,
    Interactive,
    Coherent,
    Exited,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Init => write!(f, "Init"),
            Self::CheckingCoherence => write!(f, "CheckingCoherence"),
            Self::Interactive => write!(f, "Interactive"),
            Self::Coherent => write!(f, "Coherent"),
            Self::Exited => write!(f, "Exited"),
        }
    }
}

/// How a session ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The program is coherent (on the assertions made), with the given (non-debug) atoms true.
    Coherent(Vec<Atom>),

    /// The user ended the session.
    Exited,

    /// The program is incoherent without any debug atom, and so there is nothing to debug.
    IncoherentWithoutAssumptions,
}

/// The result of a solve, with the solver released.
enum Solve {
    Coherent(Vec<Atom>),
    Incoherent(Vec<CLiteral>),
}

/// A debug session.
pub struct DebugSession<'s, S: SolverAdapter> {
    solver: &'s mut S,
    names: &'s Names,
    config: DebugConfig,
    state: SessionState,

    considered: Vec<CLiteral>,
    assertions: Vec<CLiteral>,
    facts: BTreeSet<Atom>,
    core: Vec<CLiteral>,

    preloaded: Option<Vec<CLiteral>>,
}

impl<'s, S: SolverAdapter> DebugSession<'s, S> {
    /// A session, considering each debug atom (positively).
    pub fn new(solver: &'s mut S, names: &'s Names, config: DebugConfig) -> Self {
        let considered = names
            .debug_atoms()
            .into_iter()
            .map(|atom| CLiteral::new(atom, true))
            .collect();

        DebugSession {
            solver,
            names,
            config,
            state: SessionState::Init,
            considered,
            assertions: Vec::default(),
            facts: BTreeSet::default(),
            core: Vec::default(),
            preloaded: None,
        }
    }

    /// Assertions to load once the program is found to be incoherent, as with a loaded history.
    pub fn preload_assertions(&mut self, assertions: Vec<CLiteral>) {
        self.preloaded = Some(assertions);
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The assertions made, in order.
    pub fn assertions(&self) -> &[CLiteral] {
        &self.assertions
    }

    /// The (minimized) core.
    pub fn core(&self) -> &[CLiteral] {
        &self.core
    }

    /// Atoms valued independent of any assumption.
    pub fn facts(&self) -> &BTreeSet<Atom> {
        &self.facts
    }

    /// The debug literals under consideration.
    pub fn considered(&self) -> &[CLiteral] {
        &self.considered
    }

    /// Runs the session, until the program is coherent or the user exits.
    pub fn debug(&mut self, ui: &mut impl UserInterface) -> Result<Outcome, ErrorKind> {
        ui.greet_user();
        self.state = SessionState::CheckingCoherence;
        self.solver.set_compute_unsat_cores(true);

        log::info!(target: targets::SESSION, "Checking coherence with {} debug atoms", self.considered.len());
        ui.inform_solving();

        let core = match self.solve()? {
            Solve::Coherent(answer_set) => {
                self.state = SessionState::Coherent;
                ui.inform_program_coherent(&answer_set);
                return Ok(Outcome::Coherent(answer_set));
            }
            Solve::Incoherent(core) => core,
        };

        self.facts = self.solver.valued_atoms().into_iter().collect();
        log::info!(target: targets::SESSION, "{} facts", self.facts.len());

        if core.is_empty() {
            self.state = SessionState::Exited;
            ui.inform_incoherent_without_assumptions();
            return Ok(Outcome::IncoherentWithoutAssumptions);
        }

        self.core = self.minimize(&core)?;
        self.state = SessionState::Interactive;

        if let Some(assertions) = self.preloaded.take() {
            if self.commit_assertions(assertions, ui) {
                if let Some(outcome) = self.resolve(ui)? {
                    return Ok(outcome);
                }
            }
        }

        loop {
            let command = ui.prompt_command();
            if let Some(outcome) = self.execute(command, ui)? {
                return Ok(outcome);
            }
        }
    }

    /// Executes a command, returning an outcome if the command ends the session.
    pub fn execute(
        &mut self,
        command: UserCommand,
        ui: &mut impl UserInterface,
    ) -> Result<Option<Outcome>, ErrorKind> {
        log::debug!(target: targets::SESSION, "Command: {command:?}");

        match command {
            UserCommand::ShowCore => self.show_core(ui, CoreView::Atoms),
            UserCommand::ShowCoreGroundRules => self.show_core(ui, CoreView::GroundRules),
            UserCommand::ShowCoreNonGroundRules => self.show_core(ui, CoreView::NonGroundRules),

            UserCommand::ShowHistory => ui.print_history(&self.assertions),

            UserCommand::AskQuery => return self.ask_query(ui),

            UserCommand::AssertVariable => {
                let requested = ui.get_assertions();
                if self.commit_assertions(requested, ui) {
                    return self.resolve(ui);
                }
            }

            UserCommand::UndoAssertion => {
                let index = ui.choose_assertion_to_undo(&self.assertions);
                if index < self.assertions.len() {
                    let undone = self.assertions.remove(index);
                    log::info!(target: targets::SESSION, "Undo {undone}");
                    return self.resolve(ui);
                }
            }

            UserCommand::SaveHistory => {
                let filename = ui.ask_history_filename();
                match save_history(&filename, &self.assertions, self.names) {
                    Ok(()) => ui.inform_saved_history(&filename),
                    Err(e) => ui.inform_could_not_save_history(&filename, &e),
                }
            }

            UserCommand::LoadHistory => {
                let filename = ui.ask_history_filename();
                match load_history(&filename, self.names) {
                    Ok(loaded) => {
                        ui.inform_loaded_history(&filename);
                        if self.commit_assertions(loaded, ui) {
                            return self.resolve(ui);
                        }
                    }
                    Err(e) => ui.inform_could_not_load_history(&filename, &e),
                }
            }

            UserCommand::AnalyzeDisjointCores => {
                ui.inform_solving();
                let cores = compute_disjoint_cores(&mut *self.solver, &self.assertions, &self.considered)?;
                ui.inform_analyzed_disjoint_cores(cores.len());

                if let Some(first) = fix_core(&cores, &mut self.considered) {
                    log::info!(target: targets::SESSION, "Fixed core {first:?}");
                    self.core = first;
                }
                return self.resolve(ui);
            }

            UserCommand::Exit => {
                self.state = SessionState::Exited;
                return Ok(Some(Outcome::Exited));
            }
        }

        Ok(None)
    }

    /// The literals of the core which are not assertions.
    pub fn core_without_assertions(&self) -> Vec<CLiteral> {
        self.core
            .iter()
            .filter(|literal| {
                !contains_atom(&self.assertions, literal)
                    && !self.names.is_assertion_constraint(literal.atom())
            })
            .copied()
            .collect()
    }

    /// The assertions of the core, with assertion constraints given as the literal asserted.
    pub fn core_assertions(&self) -> Vec<CLiteral> {
        let mut core_assertions = Vec::default();
        for literal in &self.core {
            if let Some(assertion) = self
                .assertions
                .iter()
                .find(|assertion| assertion.atom() == literal.atom())
            {
                core_assertions.push(*assertion);
            } else if let Some(asserted) = self.names.constraint_literal(literal.atom()) {
                core_assertions.push(asserted);
            }
        }
        core_assertions
    }

    /// Whether every literal of the core is an assertion.
    pub fn is_unfounded_core(&self) -> bool {
        self.core.iter().all(|literal| {
            contains_atom(&self.assertions, literal)
                || self.names.is_assertion_constraint(literal.atom())
        })
    }

    fn show_core(&self, ui: &mut impl UserInterface, view: CoreView) {
        ui.print_core(&self.core_without_assertions(), &self.core_assertions(), view);
    }

    fn ask_query(&mut self, ui: &mut impl UserInterface) -> Result<Option<Outcome>, ErrorKind> {
        ui.inform_computing_query_variable();

        if self.is_unfounded_core() {
            log::info!(target: targets::SESSION, "The core is unfounded");
            ui.inform_unfounded_core(&self.core_assertions());
            return Ok(None);
        }

        let selection = QuerySelector::new(&mut *self.solver, &self.assertions, &self.config).select(
            &self.core,
            &self.considered,
            self.names,
            &self.facts,
        )?;

        ui.query_response(&selection.ranking);

        let Some(&query) = selection.ranking.first() else {
            ui.inform_no_query_possible();
            return Ok(None);
        };

        let polarity = match ui.ask_truth_value(query) {
            TruthValue::True => true,
            TruthValue::False => false,
            TruthValue::Undefined => return Ok(None),
        };

        self.assertions.push(CLiteral::new(query, polarity));
        self.resolve(ui)
    }

    /// Commits each assertion which is neither already asserted nor a fact, returning true if some assertion was committed.
    fn commit_assertions(&mut self, requested: Vec<CLiteral>, ui: &mut impl UserInterface) -> bool {
        let mut committed = false;
        for assertion in requested {
            if assertion.atom() as usize > self.solver.atom_count() {
                log::warn!(target: targets::SESSION, "Skipped assertion on unknown atom {}", assertion.atom());
            } else if contains_atom(&self.assertions, &assertion) {
                ui.inform_assertion_already_present(assertion.atom());
            } else if self.facts.contains(&assertion.atom()) {
                ui.inform_assertion_is_fact(assertion.atom());
            } else {
                log::info!(target: targets::SESSION, "Assert {assertion}");
                self.assertions.push(assertion);
                committed = true;
            }
        }
        committed
    }

    /// Solves on the current assertions, recomputing the core if incoherent, or ending the session if coherent.
    fn resolve(&mut self, ui: &mut impl UserInterface) -> Result<Option<Outcome>, ErrorKind> {
        ui.inform_solving();

        match self.solve()? {
            Solve::Coherent(answer_set) => {
                self.state = SessionState::Coherent;
                ui.inform_program_coherent(&answer_set);
                Ok(Some(Outcome::Coherent(answer_set)))
            }

            Solve::Incoherent(core) => {
                self.facts.extend(self.solver.valued_atoms());
                self.core = self.minimize(&core)?;
                Ok(None)
            }
        }
    }

    fn solve(&mut self) -> Result<Solve, ErrorKind> {
        let assumptions = union(&self.assertions, &self.considered);
        let solved = self.solver.guarded_solve(&assumptions)?;

        match solved.report() {
            Report::Satisfiable => Ok(Solve::Coherent(
                solved
                    .true_atoms()
                    .into_iter()
                    .filter(|atom| !self.names.is_debug(*atom))
                    .collect(),
            )),

            Report::Unsatisfiable => match solved.unsat_core() {
                Some(core) => Ok(Solve::Incoherent(core.to_vec())),
                None => Err(err::StateError::MissingCore.into()),
            },

            Report::Unknown => Err(err::StateError::UnknownResult.into()),
        }
    }

    fn minimize(&mut self, core: &[CLiteral]) -> Result<Vec<CLiteral>, ErrorKind> {
        let minimal = QuickXPlain::new(&mut *self.solver, &[]).minimize(core)?;
        log::info!(
            target: targets::SESSION,
            "Core of {} literals: {}",
            minimal.len(),
            minimal
                .iter()
                .map(|literal| self.names.display_literal(literal))
                .collect::<Vec<_>>()
                .join(" ")
        );
        Ok(minimal)
    }
}
