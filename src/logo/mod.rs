pub mod fetcher;
pub mod traits;

pub use fetcher::LogoFetcher;
pub use traits::LogoResolver;
