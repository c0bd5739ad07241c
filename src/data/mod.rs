//! Tabular input: the dataset model, loaders, time partitioning and global bounds.

pub(crate) mod bounds;
pub(crate) mod dataset;
pub(crate) mod partition;
