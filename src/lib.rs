//! Procedural renderer for the TaskFlow app icon.
//!
//! Draws a checkmark, a short task list and three sparkles onto a square
//! canvas and writes it twice: once on the brand background color and once
//! as a transparent foreground layer for adaptive icons.

pub mod canvas;
pub mod icon_gen;
pub mod layout;
