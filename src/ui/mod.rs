pub mod hud;
pub mod integration;
pub mod settings;
pub mod street;
pub mod style;
