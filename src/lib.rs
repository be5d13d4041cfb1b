#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

pub mod casteljau;
pub mod figures;
pub mod geometry;
pub mod options;
pub mod report;
pub mod sheet;
pub mod watch;

pub use crate::casteljau::ControlPolygon;
pub use crate::geometry::Point;
