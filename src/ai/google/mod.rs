pub mod translate;
pub mod types;

pub use translate::GoogleTranslateClient;
