// Core normalization engine: header mapping, per-row contact selection,
// phone/postal repair, and coach suppression rules.
pub mod contact;
pub mod mapping;
pub mod normalize;
pub mod phone;
pub mod postal;

// Re-export the main components
pub use mapping::{detect_mapping, ColumnMapping, MappingRecord};
pub use normalize::{normalize, DestinationRow, NormalizeOutput, Summary};
