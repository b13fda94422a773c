pub mod download;
pub mod modelfile;
pub mod paths;

pub use download::WeightsDownloader;
