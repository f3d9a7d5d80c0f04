// sfplanner/src/ui/mod.rs
pub mod output_format;
pub mod table;
pub mod theme;
