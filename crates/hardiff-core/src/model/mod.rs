pub mod comparison;
pub mod correspondence;
pub mod record;
pub mod section;

pub use comparison::{ComparisonResult, ComparisonStatus};
pub use correspondence::Correspondence;
pub use record::{parse_query_string, Record, RecordBuilder};
pub use section::{ExemptionClass, SectionKind};
