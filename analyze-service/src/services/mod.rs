pub mod providers;

pub use providers::{build_provider, ProviderError, TextProvider};
