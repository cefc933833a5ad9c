//! Naming conventions shared by the rewriter and the verifier.
//!
//! Both halves of the crate agree on one thing only: how an image identifier turns into a
//! thumbnail and a full-size file name. The identifier type, the label matcher that pulls an
//! identifier out of an `<img>` tag and the path templates live here so they can be tested
//! on their own.

mod identifier;
mod label;
mod naming;

pub use identifier::{Identifier, InvalidIdentifier};
pub use label::{LABEL_PREFIX, LabelPattern};
pub use naming::{
    PageMode, full_size_file_name, full_size_link, thumbnail_file_name, thumbnail_link,
};
