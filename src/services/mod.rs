pub mod comments;
pub mod links;

pub use comments::CommentService;
pub use links::LinkService;
