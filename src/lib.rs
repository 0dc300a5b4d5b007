//! Portfolio Dashboard - multipage data analysis reports
//!
//! Report pages register with a [`registry::PageRegistry`]; each run cycle
//! renders the selected page onto a [`surface::DisplaySurface`], either the
//! GUI report view or a plain canvas for the command line.

pub mod charts;
pub mod cli;
pub mod data;
pub mod export;
pub mod gui;
pub mod logging;
pub mod pages;
pub mod registry;
pub mod settings;
pub mod stats;
pub mod surface;
