//! Internationalization (i18n) module.
//!
//! Translations are embedded JSON tables, one per [`Locale`]. Text is
//! resolved with a fixed fallback chain: requested locale, then English,
//! then the key itself.

mod catalog;
mod locale;
mod store;

pub use catalog::Catalog;
pub use locale::Locale;
pub use store::{LocaleStore, Subscription};
