// Library target shared by the binary and the integration tests in tests/.
pub mod app;
pub mod audio;
pub mod config;
pub mod event;
pub mod hotkey;
pub mod keyboard;
pub mod mission;
pub mod session;
pub mod story;
pub mod ui;
