pub mod spaces;
pub mod convert;

pub use convert::{convert, format_color, validate};
pub use spaces::{Color, ColorSpace, Whitepoint};
