pub mod components;
pub mod layout;
pub mod text_input;
pub mod theme;
