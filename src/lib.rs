pub mod engine;
pub mod gui;
pub mod logging;
pub mod pointer;
pub mod settings;
pub mod vision;
