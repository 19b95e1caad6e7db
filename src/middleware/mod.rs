// Middleware applied to the whole router

pub mod cors;

pub use cors::*;
