//! REST implementations of the form collaborators

pub mod option_fetcher;
pub mod records;
pub mod submitter;
pub mod uploader;

pub use option_fetcher::RestOptionFetcher;
pub use submitter::RestSubmitter;
pub use uploader::RestUploader;
