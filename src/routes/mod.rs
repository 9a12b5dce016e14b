pub mod comments;
pub mod links;

pub async fn info() -> &'static str {
    "This is the API of a Hackernews clone"
}
