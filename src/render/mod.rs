//! Markup for the console's table area.
//!
//! Both renderers consume a [`TableView`](crate::console::TableView), so the
//! page slicing and header rules live in one place (`console::view`).

pub mod html;
pub mod text;
