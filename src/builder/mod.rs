/*!
Tools for building a context.

# Debug DIMACS

Programs are read in a DIMACS variant, where comment lines may carry annotations:

```none
c a comment
p cnf <atoms> <clauses>
c v <atom> <name>
c d <debug constant> <n> <variable 1> .. <variable n> <rule>
<literal> .. <literal> 0
```

- `c v` lines name an atom.
  Atoms whose names begin with `_debug` are debug atoms, assumed (positively) during a debug session.
- `c d` lines register the rule behind a debug constant, and the variables of the rule in order.
  The rule is the remainder of the line.
- Clauses are sequences of non-zero integers terminated by `0`, and may span lines.

Any other line beginning with `c` is a comment.
*/

mod dimacs;

/// Splits the first whitespace delimited word from a string, returning the word and the remainder of the string.
pub(crate) fn split_word(string: &str) -> Option<(&str, &str)> {
    let trimmed = string.trim_start();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.find(char::is_whitespace) {
        Some(index) => Some((&trimmed[..index], &trimmed[index..])),
        None => Some((trimmed, "")),
    }
}
