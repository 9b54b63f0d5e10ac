//! One module per screen. Each returns the markup that goes inside `<main>`.

pub mod camera;
pub mod chat;
pub mod history;
pub mod home;
pub mod login;
pub mod recommendations;
pub mod result;
