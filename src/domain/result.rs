//! Result type alias
//!
//! This module provides a convenient Result type alias that uses EdiError
//! as the error type.

use super::errors::EdiError;

/// Result type alias for pipeline operations
///
/// # Examples
///
/// ```
/// use edi_inbound::domain::result::Result;
/// use edi_inbound::domain::errors::EdiError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(EdiError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, EdiError>;
