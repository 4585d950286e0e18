pub mod clause;
pub mod enums;
pub mod errors;
pub mod fields;
pub mod parser;
pub mod query;
pub mod registry;
pub mod segments;

pub use clause::{build_clause, FieldValue, FilterClause, RawValue};
pub use enums::{FieldOrigin, OperatorArity, OperatorTag, ValueType};
pub use errors::{ParseError, QueryError, ValidationError};
pub use fields::{static_fields, FieldDescriptor, OperatorDefaults, TIME_RANGE_FIELD};
pub use parser::{parse_query, ParsedTerm};
pub use query::{
    build_query, serialize_query, DraftState, QueryDraft, SearchQuery, TimeRangeClause,
};
pub use registry::FieldRegistry;
pub use segments::{InMemorySegmentStore, Segment, SegmentStore};
