//! Adapters Layer (Driven Adapters)
//!
//! ## Adapters
//!
//! - `InMemoryLayerStack` - In-process stack that records accepted messages
//! - `JsonLinesLayerStack` - Writes accepted messages as JSON lines
//!
//! Both adapters apply the same dictionary and message checks a renderer
//! would: a dictionary must contain files, and a message must use a symbol
//! code of the dictionary's standard at a usable location.

pub mod jsonl;
pub mod memory;

pub use jsonl::JsonLinesLayerStack;
pub use memory::InMemoryLayerStack;

use shared_types::{DictionaryType, InstalledDictionary};
use std::fs;
use std::path::Path;

use crate::domain::{AttributeKey, AttributeValue, SymbologyMessage};
use crate::ports::{LayerError, RejectReason};

/// Check that a dictionary directory holds at least one file.
pub(crate) fn check_dictionary(dictionary: &InstalledDictionary) -> Result<(), LayerError> {
    let path = dictionary.path();
    let unsupported = |reason: String| LayerError::UnsupportedDictionary {
        path: path.to_path_buf(),
        reason,
    };

    if !path.is_dir() {
        return Err(unsupported("not a directory".to_string()));
    }
    match contains_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(unsupported("dictionary contains no files".to_string())),
        Err(e) => Err(unsupported(e.to_string())),
    }
}

fn contains_file(dir: &Path) -> std::io::Result<bool> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        if file_type.is_file() || (file_type.is_dir() && contains_file(&entry.path())?) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Check one message against the layer's dictionary standard.
pub(crate) fn check_message(
    dictionary_type: DictionaryType,
    message: &SymbologyMessage,
) -> Result<(), RejectReason> {
    let code = message.symbol_code();
    if !dictionary_type.supports(&code) {
        return Err(RejectReason::UnknownSymbolCode {
            code,
            dictionary_type,
        });
    }

    let malformed = |reason: &str| RejectReason::MalformedGeometry {
        points: message.control_points(),
        reason: reason.to_string(),
    };
    if message.geometry().is_empty() {
        return Err(malformed("no points"));
    }
    if !message.geometry().iter().all(|p| p.is_finite()) {
        return Err(malformed("non-finite coordinate"));
    }
    if message.spatial_reference().is_geographic()
        && !message.geometry().iter().all(|p| p.within_geographic_bounds())
    {
        return Err(malformed("outside longitude/latitude bounds"));
    }

    for (key, value) in message.attributes() {
        check_attribute(*key, value)?;
    }
    Ok(())
}

fn check_attribute(key: AttributeKey, value: &AttributeValue) -> Result<(), RejectReason> {
    let invalid = |reason: &str| RejectReason::InvalidAttribute {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    };

    match (key, value) {
        (AttributeKey::Quantity, AttributeValue::Integer(q)) if *q < 0 => {
            Err(invalid("quantity cannot be negative"))
        }
        (AttributeKey::Direction, AttributeValue::Integer(d)) if !(0..=360).contains(d) => {
            Err(invalid("direction must be within 0..=360 degrees"))
        }
        (AttributeKey::Direction, AttributeValue::Real(d))
            if !d.is_finite() || !(0.0..=360.0).contains(d) =>
        {
            Err(invalid("direction must be within 0..=360 degrees"))
        }
        (AttributeKey::Speed, AttributeValue::Integer(s)) if *s < 0 => {
            Err(invalid("speed cannot be negative"))
        }
        (AttributeKey::Speed, AttributeValue::Real(s)) if !s.is_finite() || *s < 0.0 => {
            Err(invalid("speed must be a non-negative number"))
        }
        _ => Ok(()),
    }
}
