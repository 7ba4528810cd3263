pub mod archive;
pub mod commands;
pub mod format;
pub mod package;
pub mod records;
pub mod repository;
pub mod runtime;
pub mod version;
