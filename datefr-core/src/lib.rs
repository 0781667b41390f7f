pub mod config;
pub mod dates;
pub mod extract;
pub mod indicators;
pub mod keywords;
pub mod normalizer;
pub mod parse_input;

pub use config::Config;
pub use extract::{DateExtractor, DateResult};
pub use normalizer::{DateNormalizer, FrenchDateParser, NormalizerSettings, PreferDates};
