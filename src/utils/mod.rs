// Utility functions

pub mod logger;
pub mod net;
pub mod text;

pub use logger::*;
pub use net::*;
pub use text::*;
