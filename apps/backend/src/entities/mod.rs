pub mod todos;
pub mod users;

pub use todos::Entity as Todos;
pub use users::Entity as Users;
