mod item;
mod user;

pub use item::ItemCommands;
pub use user::UserCommands;
