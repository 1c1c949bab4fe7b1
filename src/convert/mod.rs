//! Conversions between judgment exchange formats.
//!
//! - [`Judgment`] lists: the flat `{query_text, doc_id, rating}` form.
//! - [`JudgmentTree`]: the same data grouped by query, then rating label.
//! - [`rre`]: the external hierarchical document built from and parsed into a tree.
//! - [`ltr`]: the learning-to-rank text rendering.
//!
//! Rating labels are carried as text end to end; nothing here rounds or validates them.

pub mod error;
pub mod list;
pub mod ltr;
pub mod model;
pub mod rre;
pub mod tree;


pub use error::{FormatError, FormatResult, Location};
pub use list::parse_judgment_list;
pub use ltr::{LtrRow, render_ltr};
pub use model::{Judgment, RatingLabel};
pub use rre::{
    RreDocument, RreMetadata, RrePlaceholders, RreQuery, parse_rre_document, parse_rre_text,
    to_external_judgment_document,
};
pub use tree::{JudgmentTree, QueryJudgments, flatten, unflatten};
