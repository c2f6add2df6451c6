pub mod display;
pub mod layout;
pub mod pressed;
pub mod virtual_keyboard;
