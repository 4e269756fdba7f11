pub mod command_bar;
pub mod detail;
pub mod gallery;
pub mod help;
pub mod models_view;
pub mod search_bar;
pub mod tab_bar;
pub mod toast;
