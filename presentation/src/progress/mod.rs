//! Progress indicators for the terminal client

pub mod reporter;
