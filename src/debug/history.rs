/*!
Reading and writing assertions.

A history is a sequence of lines, one for each assertion, in order:

```none
<name> <true|false>
```

The value is everything after the last space of a line, and the name everything before, so names may contain spaces.
Reading a history fails on the first malformed line, and a history is only returned if every line is read.
*/

use std::path::Path;

use crate::{
    names::Names,
    structures::{
        literal::{CLiteral, Literal},
        valuation::TruthValue,
    },
    types::err::HistoryError,
};

/// Assertions as the text of a history.
pub fn format_history(assertions: &[CLiteral], names: &Names) -> String {
    let mut text = String::default();
    for assertion in assertions {
        text.push_str(&format!(
            "{} {}\n",
            names.display_name(assertion.atom()),
            TruthValue::from(assertion.polarity())
        ));
    }
    text
}

/// Assertions from the text of a history.
pub fn parse_history(text: &str, names: &Names) -> Result<Vec<CLiteral>, HistoryError> {
    let mut assertions = Vec::default();

    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;
        let line = line.trim_end_matches('\r');

        let Some((name, value)) = line.rsplit_once(' ') else {
            return Err(HistoryError::MalformedLine(line_number));
        };
        if name.is_empty() {
            return Err(HistoryError::MalformedLine(line_number));
        }

        let Some(atom) = names.atom(name) else {
            return Err(HistoryError::UnknownName(line_number, name.to_string()));
        };

        let polarity = match value.trim().parse::<TruthValue>() {
            Ok(TruthValue::True) => true,
            Ok(TruthValue::False) => false,
            _ => return Err(HistoryError::UnknownValue(line_number, value.to_string())),
        };

        assertions.push(CLiteral::new(atom, polarity));
    }

    Ok(assertions)
}

/// Writes assertions to a file, replacing the file if it exists.
pub fn save_history(
    path: impl AsRef<Path>,
    assertions: &[CLiteral],
    names: &Names,
) -> Result<(), HistoryError> {
    std::fs::write(path, format_history(assertions, names)).map_err(|e| HistoryError::Write(e.kind()))
}

/// Reads assertions from a file.
pub fn load_history(path: impl AsRef<Path>, names: &Names) -> Result<Vec<CLiteral>, HistoryError> {
    let text = std::fs::read_to_string(path).map_err(|e| HistoryError::Read(e.kind()))?;
    parse_history(&text, names)
}
