//! Local card collection
//!
//! Cards are kept per set with a count for each printing and finish. The
//! main collection and any number of named lists are JSON files in one
//! directory; a small state file records which list additions go to.

mod archive;
mod input;
mod store;

pub use archive::{Archive, CollectedCard};
pub use input::{parse_addition_input, AdditionInput};
pub use store::{
    default_root, read_archive, write_archive, CollectionStore, State, COLLECTION_FILE,
    STATE_FILE,
};
