//! 2-D geometric operations for photomask layout generation.
//!
//! Coordinates are `f64` microns: electron-beam features reach well below one
//! micron, so integer database units are deferred to the file-format boundary.
//!
//! # Examples
//!
//! Create a [rectangle](crate::rect::Rect):
//!
//! ```
//! # use planegeom::prelude::*;
//! let rect = Rect::from_sides(10.0, 20.0, 30.0, 40.0);
//! assert_eq!(rect.center(), Point::new(20.0, 30.0));
//! ```
#![warn(missing_docs)]

pub mod bbox;
pub mod point;
pub mod polygon;
pub mod prelude;
pub mod rect;
pub mod transform;
