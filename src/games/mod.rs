//! Game implementations.

pub mod space;
