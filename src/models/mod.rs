pub mod metric;
pub mod query;
pub mod record;

pub use metric::{CoercedValue, MetricTypeHint, MetricValue, SemanticType};
pub use query::{
    Collection, IndexDef, InventoryItem, MetricDef, QueryDescriptor, ScalarSet, TableSet,
};
pub use record::{InventoryFact, InventoryValue, MetricRecord};
