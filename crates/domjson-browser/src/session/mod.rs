//! CDP page session for a single tab.

mod capture;
mod core;
mod js;
mod navigation;

pub use self::capture::CAPTURE_SCRIPT;
pub use self::core::{DEFAULT_LOAD_TIMEOUT, PageSession};
