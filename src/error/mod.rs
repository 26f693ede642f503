mod sender_error;

pub use sender_error::{ErrorKind, SenderError, SenderResult};
