//! Non-fatal findings reported alongside a conversion result.

use std::fmt;
use std::path::PathBuf;

/// Something worth telling the user that does not stop the conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A count declared in a document header disagrees with the data.
    /// Conversion always uses the actual data.
    CountMismatch {
        what: String,
        declared: usize,
        actual: usize,
    },
    /// The input length was not a multiple of the word size; the trailing
    /// bytes were not decoded.
    TrailingBytes { dropped: usize, word_bytes: usize },
    /// Tile records left over after the last complete metatile.
    PartialGroup { records: usize, group_size: usize },
    /// The input file does not have the extension the conversion expects.
    UnexpectedExtension { path: PathBuf, expected: &'static str },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::CountMismatch {
                what,
                declared,
                actual,
            } => write!(f, "{what}: header declares {declared}, data has {actual}"),
            Warning::TrailingBytes {
                dropped,
                word_bytes,
            } => write!(
                f,
                "ignored {dropped} trailing byte(s) that do not fill a {word_bytes}-byte word"
            ),
            Warning::PartialGroup {
                records,
                group_size,
            } => write!(
                f,
                "ignored {records} trailing tile(s) that do not fill a {group_size}-tile metatile"
            ),
            Warning::UnexpectedExtension { path, expected } => write!(
                f,
                "{} does not have a .{expected} extension, converting anyway",
                path.display()
            ),
        }
    }
}

/// A conversion result plus the warnings raised while producing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Converted<T> {
    pub value: T,
    pub warnings: Vec<Warning>,
}

impl<T> Converted<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    pub fn warn(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Converted<U> {
        Converted {
            value: f(self.value),
            warnings: self.warnings,
        }
    }
}

/// Warning for `dropped` leftover bytes, if there are any.
pub(crate) fn trailing_bytes(dropped: usize, word_bytes: usize) -> Option<Warning> {
    (dropped > 0).then_some(Warning::TrailingBytes {
        dropped,
        word_bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_count_mismatch() {
        let warning = Warning::CountMismatch {
            what: "metatiles".to_string(),
            declared: 512,
            actual: 513,
        };
        assert_eq!(
            warning.to_string(),
            "metatiles: header declares 512, data has 513"
        );
    }

    #[test]
    fn test_trailing_bytes() {
        assert_eq!(trailing_bytes(0, 2), None);
        assert_eq!(
            trailing_bytes(1, 2),
            Some(Warning::TrailingBytes {
                dropped: 1,
                word_bytes: 2
            })
        );
    }

    #[test]
    fn test_map_keeps_warnings() {
        let mut converted = Converted::new(2);
        converted.warn(Warning::PartialGroup {
            records: 3,
            group_size: 8,
        });
        let mapped = converted.map(|v| v * 10);
        assert_eq!(mapped.value, 20);
        assert_eq!(mapped.warnings.len(), 1);
    }
}
