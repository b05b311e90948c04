pub mod locator;
pub mod search;

pub use locator::StreetLocator;
pub use search::SearchBackend;
