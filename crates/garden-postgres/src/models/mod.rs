//! Database models for PostgreSQL operations.

mod garden;
mod garden_image;
mod garden_view;
mod member;

pub use garden::{Garden, NewGarden};
pub use garden_image::{GardenImage, NewGardenImage};
pub use garden_view::{GardenView, NewGardenView};
pub use member::{Member, NewMember};
