//! Table components for user management.
//!
//! - `header`: header row
//! - `row`: one user row with its two action buttons
//! - `invited`: invited-but-not-signed-up users
//! - `pagination`: page selector shown above the table

pub mod header;
pub mod invited;
pub mod pagination;
pub mod row;

use egui::{Frame, InnerResponse, Margin, Ui};

use crate::utils::colors::HEADER_BG_COLOR;

/// Typora-style header cell with background.
fn header_cell<R>(ui: &mut Ui, add_contents: impl FnOnce(&mut Ui) -> R) -> InnerResponse<R> {
    Frame::NONE
        .fill(HEADER_BG_COLOR)
        .inner_margin(Margin::symmetric(8, 8))
        .show(ui, add_contents)
}

/// Typora-style data cell with padding.
fn data_cell<R>(ui: &mut Ui, add_contents: impl FnOnce(&mut Ui) -> R) -> InnerResponse<R> {
    Frame::NONE
        .inner_margin(Margin::symmetric(8, 6))
        .show(ui, add_contents)
}
