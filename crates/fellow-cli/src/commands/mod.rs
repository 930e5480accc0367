pub mod decide;
pub mod dispatch;
pub mod follow;
pub mod history;
pub mod item;
pub mod profile;
pub mod search;
pub mod shared;
pub mod social;
pub mod user;
