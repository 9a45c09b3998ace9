pub mod comments;
pub mod managers;
pub mod tasks;
pub mod users;

pub use comments::CommentService;
pub use managers::ManagerService;
pub use tasks::TaskService;
pub use users::UserService;
