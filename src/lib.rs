//! Weathering Heights - current conditions for a city, themed by temperature
//!
//! This library exposes the app's modules for the binary and for testing.

pub mod action;
pub mod api;
pub mod components;
pub mod effect;
pub mod favicon;
pub mod reducer;
pub mod state;
pub mod theme;
