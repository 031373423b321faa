// Service exports
pub mod directory;
pub mod postgres;
pub mod suggester;

pub use directory::{CandidateDirectory, DirectoryError, InMemoryDirectory};
pub use postgres::PostgresDirectory;
pub use suggester::{GenerativeSettings, GenerativeSuggester, NullSuggester, ProviderError, Suggester};
