mod bucket;
mod expressible;
mod group_key;
mod hash_rollup;

pub use bucket::Bucket;
pub use expressible::{OVER_DELIMITER, OVER_PARAMETER, STREAM_PLACEHOLDER};
pub use group_key::{GroupKey, GroupValue};
pub use hash_rollup::HashRollupStream;

#[cfg(test)]
mod group_key_test;
