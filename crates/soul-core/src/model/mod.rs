pub mod namespace;
pub mod record;
pub mod resolution;
pub mod topology;
pub mod vector;

pub use namespace::Namespace;
pub use record::{is_soul_key, PackageRecord, SOUL_KEY_PREFIX};
pub use resolution::{Mapping, Resolution, Resolved};
pub use topology::TopologyMetrics;
pub use vector::FeatureVector;
