//! Invoice computation, the editable bill and the assembled document

pub mod calculator;
pub mod document;
pub mod form;
pub mod words;

pub use calculator::*;
pub use document::*;
pub use form::*;
pub use words::*;
