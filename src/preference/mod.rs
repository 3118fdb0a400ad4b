//! Adapters that remember the selected timeframe between requests.
//!
//! Both implement [`PreferenceStore`]; pick the one matching how the
//! caller talks to its users.

mod cookie;
mod file;

pub use cookie::{CookiePreference, COOKIE_MAX_AGE, COOKIE_NAME};
pub use file::FilePreference;

pub use graphwatch_graphite::PreferenceStore;
