pub mod actions;
pub mod init;
pub mod inspect;

pub use actions::{Session, compile_command, configure_command, setup_command, test_command};
pub use init::init_command;
pub use inspect::{build_dirs_command, locate_command};
