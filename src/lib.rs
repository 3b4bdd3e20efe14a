// Library surface for the binary, headless drivers and integration tests.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod format;
pub mod input;
pub mod logging;
pub mod notify;
pub mod pomodoro;
pub mod runtime;
pub mod session;
pub mod ui;
