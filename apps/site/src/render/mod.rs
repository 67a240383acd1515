// HTML for the list, detail and not-found pages. Shared by the static
// exporter and the preview server so both produce identical markup.

pub mod format;
pub mod pages;

pub use pages::{render_detail_page, render_list_page, render_not_found_page};
