use std::{
    collections::BTreeSet,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use otter_debug::{
    config::{Config, DebugConfig, TieBreak},
    context::Context,
    debug::{adapter::SolverAdapter, query::QuerySelector},
    names::Names,
    structures::{
        atom::Atom,
        literal::{CLiteral, Literal},
    },
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

fn considered(names: &Names) -> Vec<CLiteral> {
    names
        .debug_atoms()
        .into_iter()
        .map(|atom| CLiteral::new(atom, true))
        .collect()
}

fn atom(names: &Names, name: &str) -> Atom {
    names.atom(name).unwrap()
}

fn facts(the_context: &mut Context, considered: &[CLiteral]) -> BTreeSet<Atom> {
    let solved = the_context.guarded_solve(considered).unwrap();
    drop(solved);
    the_context.valued_atoms().into_iter().collect()
}

mod chain {
    use super::*;

    #[test]
    fn ranks_by_entropy() {
        let (mut the_context, names) = load("chain.cnf");
        let considered = considered(&names);
        let facts = facts(&mut the_context, &considered);
        assert!(facts.contains(&atom(&names, "f")));

        let selection = QuerySelector::new(&mut the_context, &[], &DebugConfig::default())
            .select(&considered, &considered, &names, &facts)
            .unwrap();

        // Each relaxation of the core is satisfiable, and so three models are found.
        assert_eq!(selection.models, 3);
        assert!(!selection.timed_out);

        let a = atom(&names, "a");
        let b = atom(&names, "b");
        assert_eq!(selection.entropy.get(&a), Some(&1));
        assert_eq!(selection.entropy.get(&b), Some(&-1));

        // f is true on every model, so is no better than a or b at splitting the models.
        let f_score = selection.entropy.get(&atom(&names, "f")).map(|score| score.abs());
        assert_eq!(f_score, Some(3));

        // f occurs in the rules of the core, but is a fact.
        assert_eq!(selection.occurrences.get(&atom(&names, "f")), Some(&1));
        assert_eq!(selection.ranking, vec![a, b]);
    }

    #[test]
    fn assertions_are_not_candidates() {
        let (mut the_context, names) = load("chain.cnf");
        let considered = considered(&names);
        let facts = facts(&mut the_context, &considered);

        let a = atom(&names, "a");
        let b = atom(&names, "b");
        let assertions = vec![CLiteral::new(a, true)];

        // With a asserted, the core is b :- a. and :- b.
        let core = vec![CLiteral::new(atom(&names, "_debug2"), true), CLiteral::new(atom(&names, "_debug3"), true)];

        let selection = QuerySelector::new(&mut the_context, &assertions, &DebugConfig::default())
            .select(&core, &considered, &names, &facts)
            .unwrap();

        assert_eq!(selection.models, 2);
        assert_eq!(selection.ranking, vec![b]);
    }

    #[test]
    fn no_model_no_ranking() {
        let (mut the_context, names) = load("chain.cnf");
        let considered = considered(&names);
        let facts = facts(&mut the_context, &considered);

        // The core has no literal among the considered literals, so nothing is relaxed.
        let core = vec![CLiteral::new(atom(&names, "a"), true)];
        let selection = QuerySelector::new(&mut the_context, &[], &DebugConfig::default())
            .select(&core, &considered, &names, &facts)
            .unwrap();

        assert_eq!(selection.models, 0);
        assert!(selection.ranking.is_empty());
    }
}

mod tie_break {
    use super::*;

    fn select_with(tie_break: TieBreak) -> (Vec<Atom>, Names) {
        let (mut the_context, names) = load("tie.cnf");
        let considered = considered(&names);
        let facts = facts(&mut the_context, &considered);

        let mut config = DebugConfig::default();
        config.tie_break = tie_break;
        let selection = QuerySelector::new(&mut the_context, &[], &config)
            .select(&considered, &considered, &names, &facts)
            .unwrap();

        assert_eq!(selection.models, 3);
        let a = atom(&names, "a");
        let b = atom(&names, "b");
        assert_eq!(selection.entropy.get(&a), Some(&-1));
        assert_eq!(selection.entropy.get(&b), Some(&1));
        assert_eq!(selection.occurrences.get(&a), Some(&2));
        assert_eq!(selection.occurrences.get(&b), Some(&3));

        (selection.ranking, names)
    }

    #[test]
    fn most_occurrences_first() {
        let (ranking, names) = select_with(TieBreak::MostOccurrences);
        assert_eq!(ranking, vec![atom(&names, "b"), atom(&names, "a")]);
    }

    #[test]
    fn fewest_occurrences_first() {
        let (ranking, names) = select_with(TieBreak::FewestOccurrences);
        assert_eq!(ranking, vec![atom(&names, "a"), atom(&names, "b")]);
    }
}

mod exploration {
    use super::*;

    fn first_conflict(names: &Names) -> Vec<CLiteral> {
        vec![
            CLiteral::new(atom(names, "_debug1"), true),
            CLiteral::new(atom(names, "_debug2"), true),
        ]
    }

    #[test]
    fn incoherent_relaxations_are_explored() {
        let (mut the_context, names) = load("disjoint.cnf");
        let considered = considered(&names);
        let facts = facts(&mut the_context, &considered);

        // Relaxing either rule on x leaves the conflict on y, which is relaxed in turn.
        let selection = QuerySelector::new(&mut the_context, &[], &DebugConfig::default())
            .select(&first_conflict(&names), &considered, &names, &facts)
            .unwrap();

        assert_eq!(selection.models, 4);
        assert!(!selection.timed_out);

        let x = atom(&names, "x");
        assert_eq!(selection.entropy.get(&x), Some(&0));
        assert_eq!(selection.entropy.get(&atom(&names, "y")), Some(&0));
        assert_eq!(selection.ranking, vec![x]);
    }

    #[test]
    fn stops_on_the_time_bound() {
        let (mut the_context, names) = load("disjoint.cnf");
        let considered = considered(&names);
        let facts = facts(&mut the_context, &considered);

        let mut config = DebugConfig::default();
        config.query_timeout.value = std::time::Duration::ZERO;

        let selection = QuerySelector::new(&mut the_context, &[], &config)
            .select(&first_conflict(&names), &considered, &names, &facts)
            .unwrap();

        assert!(selection.timed_out);
        assert_eq!(selection.models, 0);
        assert!(selection.ranking.is_empty());
    }
}
