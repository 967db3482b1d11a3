//! Result type alias for client operations.

use super::coze_error::CozeError;

/// Type alias for Results using CozeError.
pub type CozeResult<T> = Result<T, CozeError>;
