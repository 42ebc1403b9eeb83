pub mod audio;
pub mod cli;
pub mod config;
pub mod domain;
pub mod models;
pub mod transcription;

#[cfg(test)]
pub mod test_support;
