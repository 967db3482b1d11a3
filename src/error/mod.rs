//! Error types.
//!
//! - [`ChatStreamError`] / [`FramingError`]: terminal failures of a chat
//!   event stream (framing, unknown event, payload decode, server `error`
//!   event, transport)
//! - [`CozeError`]: everything a client call can fail with, including a
//!   wrapped [`ChatStreamError`]
//!
//! | Error | Retryable |
//! |-------|-----------|
//! | Transport / timeout / connection | Yes |
//! | HTTP 429, 5xx | Yes |
//! | Framing, unknown event, payload, `error` event | No |
//! | API envelope code, invalid request, config | No |

mod coze_error;
mod result;
mod stream;

pub use coze_error::CozeError;
pub use result::CozeResult;
pub use stream::{ChatStreamError, FramingError};
