//! User resource route handlers

pub mod create;
pub mod delete;
pub mod list;
pub mod show;
pub mod update;
pub mod update_password;

pub use create::create_user;
pub use delete::delete_user;
pub use list::list_users;
pub use show::show_user;
pub use update::update_user;
pub use update_password::update_password;
