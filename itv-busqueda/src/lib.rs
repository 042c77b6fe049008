//! Station search page: loads every ITV station, plots it, and highlights
//! the subset matching a locality/postal code/province/type filter.

pub mod errors;
pub mod config;
pub mod types;
pub mod markers;
pub mod view;
pub mod api;
pub mod ctx;
pub mod tmpl;
pub mod html;

#[cfg(test)]
mod tests;
