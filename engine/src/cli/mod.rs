// Command line arguments and the interactive analysis menu
pub mod args;
pub mod menu;
pub mod session;
