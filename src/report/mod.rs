//! Alert and weekly report text.

mod alert;
mod format;
mod locale;
mod weekly;

pub use alert::*;
pub use locale::*;
pub use weekly::*;
