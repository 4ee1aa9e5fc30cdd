use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use otter_debug::{
    config::Config,
    context::Context,
    names::Names,
    structures::literal::{CLiteral, Literal},
    types::err::{ErrorKind, ParseError},
};

fn program_path(name: &str) -> PathBuf {
    Path::new(".").join("tests").join("programs").join(name)
}

fn read(program: &str) -> Result<Names, ErrorKind> {
    let mut the_context = Context::from_config(Config::default());
    the_context.read_debug_dimacs(program.as_bytes())
}

mod names {
    use super::*;

    #[test]
    fn ground_program() {
        let mut the_context = Context::from_config(Config::default());
        let file = File::open(program_path("ground.cnf")).unwrap();
        let names = the_context.read_debug_dimacs(BufReader::new(file)).unwrap();

        let debug1 = names.atom("_debug1(a,b)").unwrap();
        let debug2 = names.atom("_debug2").unwrap();
        assert_eq!(names.debug_atoms(), vec![debug1, debug2]);

        assert_eq!(names.rule(debug1), Some("p(Y) :- r(X,Y), not p(X)."));
        assert_eq!(names.ground_rule(debug1).as_deref(), Some("p(b) :- r(a,b), not p(a)."));
        assert_eq!(names.substitution(debug1), "{ X/a, Y/b }");

        let p_a = names.atom("p(a)").unwrap();
        let p_b = names.atom("p(b)").unwrap();
        let r_ab = names.atom("r(a,b)").unwrap();
        assert_eq!(names.rule_atoms(debug1), vec![p_b, r_ab, p_a]);

        assert!(!names.is_assertion_constraint(debug1));
        assert!(names.is_assertion_constraint(debug2));
        assert_eq!(names.constraint_literal(debug2), Some(CLiteral::new(p_b, false)));

        assert_eq!(the_context.clause_db.original_count(), 2);
    }

    #[test]
    fn negative_constraint() {
        let names = read("p cnf 2 0\nc v 1 a\nc v 2 _debug1\nc d _debug1 0 :- not a.\n").unwrap();
        assert_eq!(names.constraint_literal(2), Some(CLiteral::new(1, true)));
    }

    #[test]
    fn clauses_span_lines() {
        let mut the_context = Context::from_config(Config::default());
        let program = "p cnf 3 2\n1 2\n3 0 -1\n-2 0\n";
        assert!(the_context.read_debug_dimacs(program.as_bytes()).is_ok());
        assert_eq!(the_context.clause_db.original_count(), 2);
    }
}

mod errors {
    use super::*;

    #[test]
    fn missing_problem() {
        assert_eq!(
            read("1 2 0\n").err(),
            Some(ErrorKind::Parse(ParseError::MissingProblemSpecification(1)))
        );
    }

    #[test]
    fn bad_problem() {
        assert_eq!(
            read("p cnf two 1\n").err(),
            Some(ErrorKind::Parse(ParseError::ProblemSpecification(1)))
        );
    }

    #[test]
    fn out_of_range() {
        assert_eq!(
            read("p cnf 2 1\n1 -3 0\n").err(),
            Some(ErrorKind::Parse(ParseError::AtomOutOfRange(2, -3)))
        );
    }

    #[test]
    fn bad_literal() {
        assert_eq!(
            read("c comment\np cnf 2 1\n1 x 0\n").err(),
            Some(ErrorKind::Parse(ParseError::Literal(3, "x".to_string())))
        );
    }

    #[test]
    fn duplicate_name() {
        assert_eq!(
            read("p cnf 2 0\nc v 1 a\nc v 2 a\n").err(),
            Some(ErrorKind::Parse(ParseError::DuplicateName(3, "a".to_string())))
        );
    }

    #[test]
    fn bad_rule() {
        assert_eq!(
            read("p cnf 1 0\nc d _debug1 2 X\n").err(),
            Some(ErrorKind::Parse(ParseError::Rule(2)))
        );
    }

    #[test]
    fn unterminated() {
        assert_eq!(
            read("p cnf 2 1\n1 2\n").err(),
            Some(ErrorKind::Parse(ParseError::UnterminatedClause))
        );
    }
}
