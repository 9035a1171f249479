pub mod dialogs;
pub mod row_panel;
pub mod sync;
pub mod theme;
pub mod timeline_view;
pub mod toolbar;
