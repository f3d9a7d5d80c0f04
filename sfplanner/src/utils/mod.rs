// sfplanner/src/utils/mod.rs
pub mod data_store;
