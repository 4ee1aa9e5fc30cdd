use std::io::BufRead;

use crate::{
    builder::split_word,
    context::Context,
    misc::log::targets::{self},
    names::Names,
    structures::{
        atom::Atom,
        clause::CClause,
        literal::CLiteral,
    },
    types::err::{self, ErrorKind},
};

impl Context {
    /// Reads a program in debug DIMACS into the context, returning the names read.
    ///
    /// For details on the format, see [builder](crate::builder).
    ///
    /// ```rust
    /// # use otter_debug::context::Context;
    /// # use otter_debug::config::Config;
    /// let mut the_context = Context::from_config(Config::default());
    ///
    /// let program = "
    /// p cnf 2 2
    /// c v 1 a
    /// c v 2 _debug1
    /// c d _debug1 0 :- a.
    /// 1 0
    /// -1 -2 0
    /// ";
    ///
    /// let names = the_context.read_debug_dimacs(program.as_bytes()).unwrap();
    /// assert_eq!(names.debug_atoms(), vec![2]);
    /// assert_eq!(names.rule(2), Some(":- a."));
    /// ```
    pub fn read_debug_dimacs(&mut self, mut reader: impl BufRead) -> Result<Names, ErrorKind> {
        let mut names = Names::default();
        let mut buffer = String::with_capacity(1024);
        let mut clause_buffer: CClause = Vec::default();

        let mut atom_count: Option<usize> = None;
        let mut line_counter = 0;
        let mut clause_counter = 0;

        loop {
            buffer.clear();
            match reader.read_line(&mut buffer) {
                Ok(0) => break,
                Ok(_) => line_counter += 1,
                Err(e) => return Err(err::ParseError::Read(e.kind()).into()),
            }

            let line = buffer.trim();

            match line.chars().next() {
                None => {}

                Some('c') => {
                    let mut parts = line.split_whitespace();
                    match (parts.next(), parts.next()) {
                        (Some("c"), Some("v")) => {
                            let Some(count) = atom_count else {
                                return Err(err::ParseError::MissingProblemSpecification(line_counter).into());
                            };
                            read_name(line, line_counter, count, &mut names)?;
                        }

                        (Some("c"), Some("d")) => read_rule(line, line_counter, &mut names)?,

                        _ => {}
                    }
                }

                Some('p') => {
                    let mut problem_details = line.split_whitespace();
                    let (Some("p"), Some("cnf"), Some(atoms), Some(clauses)) = (
                        problem_details.next(),
                        problem_details.next(),
                        problem_details.next(),
                        problem_details.next(),
                    ) else {
                        return Err(err::ParseError::ProblemSpecification(line_counter).into());
                    };
                    let (Ok(atoms), Ok(clauses)) = (atoms.parse::<usize>(), clauses.parse::<usize>()) else {
                        return Err(err::ParseError::ProblemSpecification(line_counter).into());
                    };

                    log::info!(target: targets::BUILDER, "Expecting {atoms} atoms and {clauses} clauses");
                    self.ensure_atoms(atoms);
                    atom_count = Some(atoms);
                }

                Some(_) => {
                    let Some(count) = atom_count else {
                        return Err(err::ParseError::MissingProblemSpecification(line_counter).into());
                    };

                    for item in line.split_whitespace() {
                        let parsed = match item.parse::<isize>() {
                            Ok(int) => int,
                            Err(_) => {
                                return Err(err::ParseError::Literal(line_counter, item.to_string()).into())
                            }
                        };

                        if parsed == 0 {
                            let the_clause = std::mem::take(&mut clause_buffer);
                            self.add_clause(the_clause)?;
                            clause_counter += 1;
                            continue;
                        }

                        if parsed.unsigned_abs() > count {
                            return Err(err::ParseError::AtomOutOfRange(line_counter, parsed).into());
                        }

                        match CLiteral::try_from(parsed) {
                            Ok(literal) => clause_buffer.push(literal),
                            Err(_) => {
                                return Err(err::ParseError::Literal(line_counter, item.to_string()).into())
                            }
                        }
                    }
                }
            }
        }

        if !clause_buffer.is_empty() {
            return Err(err::ParseError::UnterminatedClause.into());
        }

        log::info!(
            target: targets::BUILDER,
            "Read {clause_counter} clauses, {} named atoms and {} debug atoms",
            names.count(),
            names.debug_atoms().len()
        );

        Ok(names)
    }
}

/// Reads a `c v <atom> <name>` line.
fn read_name(
    line: &str,
    line_counter: usize,
    atom_count: usize,
    names: &mut Names,
) -> Result<(), ErrorKind> {
    let rest = line.trim_start_matches('c').trim_start();
    let rest = rest.strip_prefix('v').unwrap_or(rest);

    let Some((atom, name)) = split_word(rest) else {
        return Err(err::ParseError::Name(line_counter).into());
    };
    let name = name.trim();

    let atom = match atom.parse::<Atom>() {
        Ok(atom) if atom > 0 && (atom as usize) <= atom_count && !name.is_empty() => atom,
        _ => return Err(err::ParseError::Name(line_counter).into()),
    };

    match names.insert_name(atom, name) {
        Ok(()) => Ok(()),
        Err(err::NamesError::DuplicateName(name)) => Err(err::ParseError::DuplicateName(line_counter, name).into()),
    }
}

/// Reads a `c d <constant> <n> <variables> <rule>` line.
fn read_rule(line: &str, line_counter: usize, names: &mut Names) -> Result<(), ErrorKind> {
    let rest = line.trim_start_matches('c').trim_start();
    let rest = rest.strip_prefix('d').unwrap_or(rest);

    let Some((constant, rest)) = split_word(rest) else {
        return Err(err::ParseError::Rule(line_counter).into());
    };
    let Some((count, mut rest)) = split_word(rest) else {
        return Err(err::ParseError::Rule(line_counter).into());
    };
    let Ok(count) = count.parse::<usize>() else {
        return Err(err::ParseError::Rule(line_counter).into());
    };

    let mut variables = Vec::with_capacity(count);
    for _ in 0..count {
        let Some((variable, remainder)) = split_word(rest) else {
            return Err(err::ParseError::Rule(line_counter).into());
        };
        variables.push(variable.to_string());
        rest = remainder;
    }

    let rule = rest.trim();
    if rule.is_empty() {
        return Err(err::ParseError::Rule(line_counter).into());
    }

    names.insert_rule(constant, variables, rule);
    Ok(())
}
