pub mod error;
pub mod frontmatter;
pub mod fsquery;
pub mod paths;
pub mod profile;
pub mod skill;
pub mod stack;

pub use error::{EnvoyError, Result};
