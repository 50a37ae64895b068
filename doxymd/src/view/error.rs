//! Cross-referencing failures. Any of these means the generated site would
//! contain broken links, so the run stops.

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("reference to `{refid}`, which is not a compound of this export")]
    DanglingReference { refid: String },

    #[error("permalink `{permalink}` is claimed by both `{first}` and `{second}`")]
    PermalinkCollision {
        permalink: String,
        first: String,
        second: String,
    },

    #[error("page identifier `{page_id}` is claimed by both `{first}` and `{second}`")]
    PageIdCollision {
        page_id: String,
        first: String,
        second: String,
    },
}
