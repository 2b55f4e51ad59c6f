//! Boundary to the identity/claims collaborator.

/// Source of the signed-in subject identifier used for user-scope keys.
///
/// Implementations typically read the stable object/subject identifier
/// claim of the current principal. Returning `None` (no authenticated
/// principal in context) disables user-scope caching for the call instead
/// of failing it.
pub trait SubjectSource {
    /// Stable per-user identifier of the signed-in principal, if any.
    fn current_subject_id(&self) -> Option<String>;
}
