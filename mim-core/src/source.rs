use crate::observation::FeatureSet;
use crate::query::QuerySpec;

/// Feature data source collaborator: executes query specifications.
///
/// Implementations decide transport and storage. The engine relies only on
/// grouped-count execution with optional spatial constraints; everything
/// else about the source is opaque.
pub trait FeatureSource {
    fn query_features(&self, query: &QuerySpec) -> anyhow::Result<FeatureSet>;
}
