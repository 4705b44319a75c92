pub mod api;
pub mod config;
pub mod error;
pub mod ganzhi;
pub mod generator;
pub mod lexicon;
pub mod name;
pub mod numerology;
pub mod unihan;

pub use api::{Engine, KirsenReport};
pub use error::{NameForgeError, NfResult};
