//! Stable facade for the pagination helpers used by the router.

mod keyboard;
mod page;
pub mod token;

pub use keyboard::render_keyboard;
pub use page::{page_number, page_offset, page_window, parse_one_based_page, total_pages};
pub use token::{ActionTag, parse_action_tag};
