pub use super::articles::Entity as Articles;
pub use super::users::Entity as Users;
