pub mod blocking;

pub use blocking::StructureBlockers;
