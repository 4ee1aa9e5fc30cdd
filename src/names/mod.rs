/*!
Names of atoms, and the rules behind debug atoms.

A [Names] value is built once, when a program is read, and is read only during a debug session.

# Debug atoms

An atom is a debug atom if its name begins with `_debug`.
The name of a debug atom is a *debug constant*, optionally followed by a parenthesised list of terms, e.g. `_debug3(a,f(b,c))`.
For each debug constant a rule is registered, together with the variables of the rule, in order.
The terms of a debug atom are the substitution for the variables of the rule of its constant.

```rust
# use otter_debug::names::Names;
let mut names = Names::default();
names.insert_name(1, "_debug1(a,b)").unwrap();
names.insert_name(2, "p(a)").unwrap();
names.insert_name(3, "q(b)").unwrap();
names.insert_rule("_debug1", vec!["X".to_string(), "Y".to_string()], ":- p(X), q(Y).");

assert_eq!(names.ground_rule(1).as_deref(), Some(":- p(a), q(b)."));
assert_eq!(names.substitution(1), "{ X/a, Y/b }");
assert_eq!(names.rule_atoms(1), vec![2, 3]);
```
*/

use std::collections::{BTreeMap, HashMap};

use crate::{
    structures::{
        atom::Atom,
        literal::{CLiteral, Literal},
    },
    types::err::{self},
};

/// The prefix of the name of a debug atom.
pub const DEBUG_PREFIX: &str = "_debug";

/// A rule registered for a debug constant.
#[derive(Clone, Debug, Default)]
pub struct RuleEntry {
    /// The variables of the rule, in the order terms of a debug atom are given.
    pub variables: Vec<String>,

    /// The text of the rule.
    pub rule: String,
}

/// Names of atoms, and rules of debug constants.
#[derive(Clone, Debug, Default)]
pub struct Names {
    names: HashMap<Atom, String>,
    atoms: HashMap<String, Atom>,
    rules: HashMap<String, RuleEntry>,
}

impl Names {
    /// Names an atom.
    ///
    /// Returns an error if the name is already used for some other atom.
    pub fn insert_name(&mut self, atom: Atom, name: impl Into<String>) -> Result<(), err::NamesError> {
        let name = name.into();
        match self.atoms.get(&name) {
            Some(&existing) if existing != atom => Err(err::NamesError::DuplicateName(name)),
            _ => {
                if let Some(previous) = self.names.insert(atom, name.clone()) {
                    self.atoms.remove(&previous);
                }
                self.atoms.insert(name, atom);
                Ok(())
            }
        }
    }

    /// Registers a rule for a debug constant, replacing any rule previously registered.
    pub fn insert_rule(
        &mut self,
        constant: impl Into<String>,
        variables: Vec<String>,
        rule: impl Into<String>,
    ) {
        let entry = RuleEntry {
            variables,
            rule: rule.into(),
        };
        self.rules.insert(constant.into(), entry);
    }

    /// The name of an atom, if any.
    pub fn name(&self, atom: Atom) -> Option<&str> {
        self.names.get(&atom).map(|name| name.as_str())
    }

    /// The name of an atom, or the atom as a string if the atom has no name.
    pub fn display_name(&self, atom: Atom) -> String {
        match self.name(atom) {
            Some(name) => name.to_string(),
            None => atom.to_string(),
        }
    }

    /// The literal as a string, with a `-` prefix for negative polarity.
    pub fn display_literal(&self, literal: &CLiteral) -> String {
        match literal.polarity() {
            true => self.display_name(literal.atom()),
            false => format!("-{}", self.display_name(literal.atom())),
        }
    }

    /// The atom with the given name, if any.
    ///
    /// A name which is a positive integer, without any atom of that name, is read as the atom of that integer.
    pub fn atom(&self, name: &str) -> Option<Atom> {
        match self.atoms.get(name) {
            Some(atom) => Some(*atom),
            None => match name.parse::<Atom>() {
                Ok(atom) if atom > 0 && !self.names.contains_key(&atom) => Some(atom),
                _ => None,
            },
        }
    }

    /// A count of named atoms.
    pub fn count(&self) -> usize {
        self.names.len()
    }

    /// Whether the atom is a debug atom.
    pub fn is_debug(&self, atom: Atom) -> bool {
        self.name(atom)
            .is_some_and(|name| name.starts_with(DEBUG_PREFIX))
    }

    /// All debug atoms, in ascending order.
    pub fn debug_atoms(&self) -> Vec<Atom> {
        let mut atoms: Vec<Atom> = self
            .names
            .iter()
            .filter(|(_, name)| name.starts_with(DEBUG_PREFIX))
            .map(|(atom, _)| *atom)
            .collect();
        atoms.sort_unstable();
        atoms
    }

    /// The rule registered for the constant of a debug atom.
    pub fn rule(&self, atom: Atom) -> Option<&str> {
        let name = self.name(atom)?;
        self.rules
            .get(constant_of(name))
            .map(|entry| entry.rule.as_str())
    }

    /// Pairs of variables and terms, ordered by variable.
    ///
    /// Empty if the atom has no terms, or if the count of terms differs from the count of variables.
    pub fn substitution_map(&self, atom: Atom) -> BTreeMap<String, String> {
        let mut map = BTreeMap::default();
        let Some(name) = self.name(atom) else {
            return map;
        };
        let Some(entry) = self.rules.get(constant_of(name)) else {
            return map;
        };

        let terms = terms_of(name);
        if terms.len() != entry.variables.len() {
            log::warn!("Terms of {name} do not match the variables of the rule");
            return map;
        }
        for (variable, term) in entry.variables.iter().zip(terms) {
            map.insert(variable.clone(), term);
        }
        map
    }

    /// The substitution of a debug atom, as a string of the form `{ X/a, Y/b }`.
    ///
    /// Empty, if there is no substitution.
    pub fn substitution(&self, atom: Atom) -> String {
        let map = self.substitution_map(atom);
        if map.is_empty() {
            return String::default();
        }
        let pairs: Vec<String> = map
            .iter()
            .map(|(variable, term)| format!("{variable}/{term}"))
            .collect();
        format!("{{ {} }}", pairs.join(", "))
    }

    /// The rule of a debug atom, with the terms of the atom in place of the variables of the rule.
    pub fn ground_rule(&self, atom: Atom) -> Option<String> {
        let rule = self.rule(atom)?;
        let map = self.substitution_map(atom);
        Some(substitute(rule, &map))
    }

    /// The (known) atoms occurring in the ground rule of a debug atom, in order of occurrence.
    ///
    /// An atom occurring multiple times is listed multiple times.
    pub fn rule_atoms(&self, atom: Atom) -> Vec<Atom> {
        match self.ground_rule(atom) {
            Some(rule) => atom_names(&rule)
                .iter()
                .filter_map(|name| self.atoms.get(name).copied())
                .collect(),
            None => Vec::default(),
        }
    }

    /// Whether the debug atom relaxes a constraint on a single literal, e.g. `:- not a.`
    ///
    /// Such a constraint behaves as an assertion made by the program itself.
    pub fn is_assertion_constraint(&self, atom: Atom) -> bool {
        let Some(name) = self.name(atom) else {
            return false;
        };
        if !name.starts_with(DEBUG_PREFIX) || name.contains('(') {
            return false;
        }
        match self.rule(atom) {
            Some(rule) => {
                let stripped: String = rule.chars().filter(|c| !c.is_whitespace()).collect();
                stripped.starts_with(":-") && !stripped.contains(',')
            }
            None => false,
        }
    }

    /// The literal asserted by an assertion constraint, if the debug atom relaxes such a constraint.
    ///
    /// For `:- not a.` the literal is `a`, and for `:- a.` the literal is `-a`.
    pub fn constraint_literal(&self, atom: Atom) -> Option<CLiteral> {
        if !self.is_assertion_constraint(atom) {
            return None;
        }
        let rule = self.ground_rule(atom)?;
        let asserted = *self.rule_atoms(atom).first()?;
        Some(CLiteral::new(asserted, rule.contains("not ")))
    }
}

/// The debug constant of a name, i.e. the name up to the first `(`.
pub fn constant_of(name: &str) -> &str {
    match name.find('(') {
        Some(index) => &name[..index],
        None => name,
    }
}

/// The top-level terms of a name, respecting nested parentheses.
pub fn terms_of(name: &str) -> Vec<String> {
    let (Some(open), Some(close)) = (name.find('('), name.rfind(')')) else {
        return Vec::default();
    };
    if close <= open {
        return Vec::default();
    }
    let inner = &name[open + 1..close];
    if inner.is_empty() {
        return Vec::default();
    }

    let mut terms = Vec::default();
    let mut depth = 0_usize;
    let mut current = String::default();
    for c in inner.chars() {
        match c {
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ',' if depth == 0 => terms.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    terms.push(current);
    terms
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

const BEFORE_VARIABLE: &[char] = &[',', ';', '(', ' '];
const AFTER_VARIABLE: &[char] = &[',', ';', ')', ' '];

/// Replaces each variable of the map in the rule by its term.
///
/// A variable is replaced only if preceded by one of `,;( ` and followed by one of `,;) `.
fn substitute(rule: &str, map: &BTreeMap<String, String>) -> String {
    if map.is_empty() {
        return rule.to_string();
    }
    let chars: Vec<char> = rule.chars().collect();
    let mut ground = String::with_capacity(rule.len());
    let mut index = 0;

    while index < chars.len() {
        if !is_identifier_char(chars[index]) {
            ground.push(chars[index]);
            index += 1;
            continue;
        }

        let start = index;
        while index < chars.len() && is_identifier_char(chars[index]) {
            index += 1;
        }
        let word: String = chars[start..index].iter().collect();

        let before = start.checked_sub(1).map(|i| chars[i]);
        let after = chars.get(index).copied();
        let delimited = before.is_some_and(|c| BEFORE_VARIABLE.contains(&c))
            && after.is_some_and(|c| AFTER_VARIABLE.contains(&c));

        match map.get(&word) {
            Some(term) if delimited => ground.push_str(term),
            _ => ground.push_str(&word),
        }
    }
    ground
}

/// Names of (candidate) atoms in a rule, with whitespace removed.
///
/// A candidate atom is an identifier beginning with a lowercase letter (after any leading underscores), optionally followed by a parenthesised list of arguments.
/// The keyword `not` is skipped, and identifiers beginning with an uppercase letter or a digit are not atoms.
fn atom_names(rule: &str) -> Vec<String> {
    let chars: Vec<char> = rule.chars().collect();
    let mut names = Vec::default();
    let mut index = 0;

    while index < chars.len() {
        if !is_identifier_char(chars[index]) {
            index += 1;
            continue;
        }

        let start = index;
        while index < chars.len() && is_identifier_char(chars[index]) {
            index += 1;
        }
        let word: String = chars[start..index].iter().collect();

        let is_atom = word
            .trim_start_matches('_')
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_lowercase());
        if !is_atom || word == "not" {
            continue;
        }

        let mut lookahead = index;
        while lookahead < chars.len() && chars[lookahead].is_whitespace() {
            lookahead += 1;
        }

        let mut name = word;
        if chars.get(lookahead) == Some(&'(') {
            let mut depth = 0_usize;
            let mut end = lookahead;
            while end < chars.len() {
                match chars[end] {
                    '(' => depth += 1,
                    ')' => {
                        depth -= 1;
                        if depth == 0 {
                            break;
                        }
                    }
                    _ => {}
                }
                end += 1;
            }
            if end < chars.len() {
                name.extend(chars[lookahead..=end].iter().filter(|c| !c.is_whitespace()));
                index = end + 1;
            }
        }
        names.push(name);
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terms_nested() {
        assert_eq!(terms_of("_debug1(a,f(b,c),1)"), vec!["a", "f(b,c)", "1"]);
        assert!(terms_of("_debug1").is_empty());
        assert!(terms_of("_debug1()").is_empty());
    }

    #[test]
    fn constants() {
        assert_eq!(constant_of("_debug12(a)"), "_debug12");
        assert_eq!(constant_of("_debug12"), "_debug12");
    }

    #[test]
    fn substitution_requires_delimiters() {
        let mut map = BTreeMap::default();
        map.insert("X".to_string(), "a".to_string());
        assert_eq!(substitute("p(X) :- q(X,XY), r(X).", &map), "p(a) :- q(a,XY), r(a).");
        assert_eq!(substitute("X :- p.", &map), "X :- p.");
    }

    #[test]
    fn atoms_of_rule() {
        assert_eq!(
            atom_names("a(1, b) :- not c, d(f(x)), X = 2, _e."),
            vec!["a(1,b)", "c", "d(f(x))", "_e"]
        );
    }

    #[test]
    fn assertion_constraints() {
        let mut names = Names::default();
        names.insert_name(1, "a").unwrap();
        names.insert_name(2, "_debug1").unwrap();
        names.insert_name(3, "_debug2").unwrap();
        names.insert_name(4, "_debug3").unwrap();
        names.insert_rule("_debug1", vec![], ":- not a.");
        names.insert_rule("_debug2", vec![], ":- a.");
        names.insert_rule("_debug3", vec![], ":- a, b.");

        assert_eq!(names.constraint_literal(2), Some(CLiteral::new(1, true)));
        assert_eq!(names.constraint_literal(3), Some(CLiteral::new(1, false)));
        assert_eq!(names.constraint_literal(4), None);
        assert_eq!(names.constraint_literal(1), None);
    }

    #[test]
    fn duplicate_names() {
        let mut names = Names::default();
        assert!(names.insert_name(1, "a").is_ok());
        assert_eq!(
            names.insert_name(2, "a"),
            Err(err::NamesError::DuplicateName("a".to_string()))
        );
        assert_eq!(names.atom("a"), Some(1));
        assert_eq!(names.atom("2"), Some(2));
        assert_eq!(names.atom("1"), None);
    }
}
