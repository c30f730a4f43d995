#[macro_use]
extern crate serde_derive;

mod constants;
pub mod document;
mod errors;
mod events;
mod ids;
mod layer;
mod project;

pub use crate::constants::DEFAULT_CANVAS_SIZE;
pub use crate::errors::DocumentError;
pub use crate::events::ProjectEvent;
pub use crate::ids::{LayerId, ProjectId};
pub use crate::layer::Layer;
pub use crate::project::Project;
pub use structures::{Color, Coordinate, Pack, Size};
