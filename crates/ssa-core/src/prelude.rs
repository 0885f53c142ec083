pub use crate::app::App;
pub use ssa_types::auth::Auth;
pub use ssa_types::error::{ClResult, Error};
pub use ssa_types::types::{Timestamp, now};

pub use tracing::{debug, debug_span, error, error_span, info, info_span, warn, warn_span};

// vim: ts=4
