pub mod assets;
pub mod cards;

pub mod importer {
    pub mod star_wars_unlimited;
}

pub mod error;
pub use error::{Error, Result};
