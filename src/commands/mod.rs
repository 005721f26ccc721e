pub mod init;
pub mod tasks;
pub mod ui;

pub use init::cmd_init;
pub use tasks::{cmd_add, cmd_delete, cmd_list, cmd_toggle};
pub use ui::cmd_ui;
