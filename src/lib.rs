pub mod catalog;
pub mod config;
pub mod diagnostics;
pub mod output;
pub mod pipeline;
pub mod reference;
pub mod scoring;
pub mod validation;
