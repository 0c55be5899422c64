// Adapters layer: concrete implementations of domain ports.

pub mod json_file;

pub use json_file::JsonFileRepository;
