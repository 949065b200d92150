use crate::backend::BackendError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutlineError {
    #[error("node is not tracked by the outline tree (removed or never registered)")]
    Detached,

    #[error("cannot promote a top-level bookmark past the root")]
    AtRoot,

    #[error("sibling reference is not a child of the requested parent")]
    StraySibling,

    #[error("cannot move a bookmark into its own subtree")]
    IntoOwnSubtree,

    #[error("invalid page input: {0:?}")]
    PageInput(String),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

pub type Result<T> = std::result::Result<T, OutlineError>;
