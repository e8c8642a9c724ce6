pub mod bucketizer;
pub mod types;

pub use bucketizer::split_into_buckets;
pub use types::Bucket;
