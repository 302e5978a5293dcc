mod load;
mod snapshot;

pub use load::{load_options, load_snapshot};
pub use snapshot::{Group, GroupId, Person, PersonId, Relationship, Snapshot};
