/// How a write request treats missing payload fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// `POST`, required fields must be present
    Create,
    /// `PUT`, replaces the whole resource so required fields must be present
    Update,
    /// `PATCH`, only present fields are written
    Patch,
}

impl WriteMode {
    /// Whether required fields must be present in the payload.
    pub fn requires_all(&self) -> bool {
        matches!(self, WriteMode::Create | WriteMode::Update)
    }
}

/// Removes duplicate ids while keeping the first occurrence order.
pub fn unique_ids(ids: &[uuid::Uuid]) -> Vec<uuid::Uuid> {
    let mut seen = std::collections::HashSet::new();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// Outcome of attaching one resource to another.
#[derive(Debug, Clone)]
pub struct Membership<T> {
    /// False when the link already existed
    pub created: bool,
    /// Linked resources after the change
    pub items: Vec<T>,
}
