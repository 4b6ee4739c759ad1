#![warn(clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::doc_markdown
)]

pub mod app;
pub mod browser;
pub mod cli;
pub mod controller;
pub mod debounce;
pub mod events;
pub mod github;
pub mod input;
pub mod settings;
pub mod tui;
