use crate::types::err::{self};

/// A configuration option, with a name and the range of permitted values.
#[derive(Clone, Debug)]
pub struct ConfigOption<T> {
    pub name: &'static str,
    pub min: T,
    pub max: T,
    pub value: T,
}

impl<T: Clone + PartialOrd + std::fmt::Debug> ConfigOption<T> {
    pub fn min_max(&self) -> (T, T) {
        (self.min.clone(), self.max.clone())
    }

    /// Sets the value of the option, if the value is within the permitted range.
    ///
    /// Otherwise, the value of the option is unchanged and an error naming the range is returned.
    pub fn set(&mut self, value: T) -> Result<(), err::ConfigError> {
        let (min, max) = self.min_max();
        if min <= value && value <= max {
            self.value = value;
            Ok(())
        } else {
            Err(err::ConfigError::OutOfRange {
                name: self.name,
                min: format!("{min:?}"),
                max: format!("{max:?}"),
            })
        }
    }
}
