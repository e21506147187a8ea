pub mod entry;
pub mod enums;
pub mod filters;
pub mod profile;
pub mod symptom;

pub use entry::*;
pub use filters::*;
pub use profile::*;
pub use symptom::*;
