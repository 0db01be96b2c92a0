pub mod header;
pub mod report_table;
pub mod session_select;
pub mod status_icon;
