pub mod font;
pub mod text;
