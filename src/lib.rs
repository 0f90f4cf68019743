pub mod cli;
pub mod config;
pub mod launcher;
pub mod models;
pub mod normalize;
pub mod protocol;
pub mod source;

pub use config::{Config, NormalizeConfig};
pub use launcher::{LaunchError, SearchRequest};
pub use models::{TitleLookup, TitleRecord};
pub use normalize::{Normalizer, TermTable, normalize, normalize_optional};
