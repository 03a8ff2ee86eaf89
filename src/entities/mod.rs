pub mod prelude;

pub mod articles;
pub mod users;
