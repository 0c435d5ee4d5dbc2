use serde::Deserialize;
use uuid::Uuid;

#[derive(Deserialize)]
pub struct ResourceReqPath {
    id: Uuid,
}

impl ResourceReqPath {
    pub fn id(&self) -> &Uuid {
        &self.id
    }
}

#[derive(Deserialize)]
pub struct FindManyResourceReqQuery {
    all: Option<bool>,
}

impl FindManyResourceReqQuery {
    /// Asks for hidden entries too. Honoured only for admin sessions.
    pub fn all(&self) -> bool {
        self.all.unwrap_or(false)
    }
}
