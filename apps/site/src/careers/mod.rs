// Career content pipeline: YAML files on disk → validated `CareerRecord`s.
// Everything downstream (pages, static export, preview server) goes through
// `CareerLoader`; nothing else touches the content directory.

pub mod error;
pub mod handlers;
pub mod loader;
pub mod models;
pub mod parser;
pub mod validation;

pub use error::CareerError;
pub use loader::{CareerLoader, LoadFailure};
pub use models::{CareerRecord, Contact, Item, ItemValue, Section};
pub use validation::ValuePolicy;
