use thiserror::Error;

/// Structural problems in backend records.
///
/// Derivations never return these; they degrade instead. Callers that want to
/// surface bad data run the `validate` methods explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("network {network_id} has {count} main hospitals, expected at most one")]
    MultipleMainHospitals { network_id: String, count: usize },

    #[error(
        "dependent center {center_id} has {count} main hospital relations, expected exactly one"
    )]
    DependentCenterRelations { center_id: String, count: usize },
}

pub type ModelResult<T> = Result<T, ModelError>;
