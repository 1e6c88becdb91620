//! Typed repositories over the garden schema.

mod garden_views;
mod gardens;
mod members;

pub use garden_views::GardenViewRepository;
pub use gardens::{CoordinateSpan, GardenRepository};
pub use members::MemberRepository;
