// lexgate-mcp/src/validation.rs
// ============================================================================
// Module: Argument Validation
// Description: Typed extraction from loosely-typed tool arguments.
// Purpose: Map generic argument objects to per-tool records or fail.
// Dependencies: lexgate-core, serde_json, time
// ============================================================================

//! ## Overview
//! One validation layer for every tool: arguments arrive as a generic
//! JSON object and leave as typed values or an `invalid_arguments`
//! failure naming the offending field. Unknown fields are ignored;
//! strings must be non-empty after trimming; dates must be ISO
//! `YYYY-MM-DD`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use lexgate_core::CitationStyle;
use lexgate_core::ToolErrorCode;
use lexgate_core::ToolFailure;
use serde_json::Map;
use serde_json::Value;
use time::Date;
use time::macros::format_description;

// ============================================================================
// SECTION: Arguments
// ============================================================================

/// View over a tool call's argument object.
pub struct Arguments<'a> {
    /// Underlying object; absent when the call carried no arguments.
    entries: Option<&'a Map<String, Value>>,
}

impl<'a> Arguments<'a> {
    /// Wraps an argument value.
    ///
    /// # Errors
    ///
    /// Returns an `invalid_arguments` failure when the value is neither
    /// an object nor null.
    pub fn new(value: &'a Value) -> Result<Self, ToolFailure> {
        match value {
            Value::Object(entries) => Ok(Self {
                entries: Some(entries),
            }),
            Value::Null => Ok(Self {
                entries: None,
            }),
            _ => Err(invalid("arguments must be an object")),
        }
    }

    fn get(&self, field: &str) -> Option<&'a Value> {
        self.entries.and_then(|entries| entries.get(field))
    }

    /// Extracts a required non-empty string.
    ///
    /// # Errors
    ///
    /// Returns an `invalid_arguments` failure naming the field.
    pub fn required_str(&self, field: &str) -> Result<&'a str, ToolFailure> {
        match self.get(field) {
            Some(Value::String(value)) => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    Err(invalid(&format!("{field} must be a non-empty string")))
                } else {
                    Ok(trimmed)
                }
            }
            Some(_) => Err(invalid(&format!("{field} must be a string"))),
            None => Err(invalid(&format!("{field} is required"))),
        }
    }

    /// Extracts an optional non-empty string.
    ///
    /// # Errors
    ///
    /// Returns an `invalid_arguments` failure when the field is present
    /// with the wrong type or empty.
    pub fn optional_str(&self, field: &str) -> Result<Option<&'a str>, ToolFailure> {
        match self.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(value)) => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    Err(invalid(&format!("{field} must be a non-empty string")))
                } else {
                    Ok(Some(trimmed))
                }
            }
            Some(_) => Err(invalid(&format!("{field} must be a string"))),
        }
    }

    /// Extracts an optional non-negative integer limit.
    ///
    /// Range clamping happens downstream; only the type is enforced
    /// here.
    ///
    /// # Errors
    ///
    /// Returns an `invalid_arguments` failure when the field is present
    /// and not a non-negative integer.
    pub fn optional_limit(&self, field: &str) -> Result<Option<usize>, ToolFailure> {
        match self.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(number)) => number
                .as_u64()
                .and_then(|value| usize::try_from(value).ok())
                .map(Some)
                .ok_or_else(|| invalid(&format!("{field} must be a non-negative integer"))),
            Some(_) => Err(invalid(&format!("{field} must be a number"))),
        }
    }

    /// Extracts an optional boolean.
    ///
    /// # Errors
    ///
    /// Returns an `invalid_arguments` failure when the field is present
    /// and not a boolean.
    pub fn optional_bool(&self, field: &str) -> Result<Option<bool>, ToolFailure> {
        match self.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Bool(value)) => Ok(Some(*value)),
            Some(_) => Err(invalid(&format!("{field} must be a boolean"))),
        }
    }

    /// Extracts an optional ISO `YYYY-MM-DD` date.
    ///
    /// # Errors
    ///
    /// Returns an `invalid_arguments` failure when the field is present
    /// and not a well-formed date.
    pub fn optional_date(&self, field: &str) -> Result<Option<&'a str>, ToolFailure> {
        let Some(value) = self.optional_str(field)? else {
            return Ok(None);
        };
        let format = format_description!("[year]-[month]-[day]");
        if Date::parse(value, &format).is_err() {
            return Err(invalid(&format!("{field} must be an ISO YYYY-MM-DD date")));
        }
        Ok(Some(value))
    }

    /// Extracts an optional citation style, defaulting to `default`.
    ///
    /// # Errors
    ///
    /// Returns an `invalid_arguments` failure when the field is present
    /// and not one of `default`, `short`, `pinpoint`.
    pub fn optional_style(&self, field: &str) -> Result<CitationStyle, ToolFailure> {
        let Some(value) = self.optional_str(field)? else {
            return Ok(CitationStyle::Default);
        };
        CitationStyle::parse(value)
            .ok_or_else(|| invalid(&format!("{field} must be one of default, short, pinpoint")))
    }
}

/// Builds an `invalid_arguments` failure.
#[must_use]
pub fn invalid(message: &str) -> ToolFailure {
    ToolFailure::new(ToolErrorCode::InvalidArguments, message)
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
