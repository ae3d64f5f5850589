pub mod error;
pub mod fetcher;
pub mod helpers;
pub mod payments;
pub mod summarizer;
