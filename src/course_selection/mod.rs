//! Course preference selection: the pure resolver plus its persistence.

pub mod resolver;
pub mod service;

pub use resolver::{Resolver, Selection, SelectionError};
pub use service::{CatalogOption, CourseApplicationView};
