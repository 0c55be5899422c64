use crate::domain::model::PlanRecord;
use crate::utils::error::Result;

/// Persistence for plan records. The pricing engine never calls this itself; callers
/// save whatever the controller last derived or accepted as manual input.
pub trait PlanRepository: Send + Sync {
    fn load(
        &self,
        plan_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<PlanRecord>>> + Send;

    /// Returns the location the record was written to.
    fn save(&self, record: &PlanRecord) -> impl std::future::Future<Output = Result<String>> + Send;
}
