mod ids;
mod location;
mod user;

pub use ids::UserId;
pub use location::Location;
pub use user::{CreateUser, UpdateUser, User, UserList};
