//! Binary <-> document conversion for each domain.
//!
//! Every `decode` takes an in-memory buffer and a descriptor and returns a
//! document; every `encode` takes a document and returns the bytes to write.
//! Neither direction touches the filesystem.

pub mod attributes;
pub mod mapgrid;
pub mod metatiles;

use crate::{
    diagnostics::Warning,
    errors::{Error, Result},
};

fn ensure_not_empty(buffer: &[u8]) -> Result<()> {
    if buffer.is_empty() {
        return Err(Error::EmptyInput);
    }

    Ok(())
}

/// Warns when the data holds more entries than its header declares.
fn check_declared_max(what: &str, declared: usize, actual: usize) -> Option<Warning> {
    (actual > declared).then(|| Warning::CountMismatch {
        what: what.to_string(),
        declared,
        actual,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_not_empty() {
        assert!(matches!(ensure_not_empty(&[]), Err(Error::EmptyInput)));
        assert!(ensure_not_empty(&[0]).is_ok());
    }

    #[test]
    fn test_check_declared_max() {
        assert_eq!(check_declared_max("metatiles", 2, 2), None);
        assert_eq!(check_declared_max("metatiles", 2, 1), None);
        assert_eq!(
            check_declared_max("metatiles", 2, 3),
            Some(Warning::CountMismatch {
                what: "metatiles".to_string(),
                declared: 2,
                actual: 3
            })
        );
    }
}
