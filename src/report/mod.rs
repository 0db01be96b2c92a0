pub mod txt;
pub mod page;
pub mod summary;

pub use txt::generate_txt_report;
pub use page::{render_page, write_page};
pub use summary::Summary;
