//! User DataLoader for batched fetching
//!
//! This loader batches the creator lookups of every post in a response into a
//! single repository call.

use async_graphql::dataloader::Loader;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::User;
use crate::repositories::UserRepository;

/// DataLoader for batching user queries
#[derive(Clone)]
pub struct UserLoader {
    users: Arc<dyn UserRepository>,
}

impl UserLoader {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

impl Loader<Uuid> for UserLoader {
    type Value = User;
    type Error = Arc<ApiError>;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Self::Value>, Self::Error> {
        self.users.find_many(keys).await.map_err(Arc::new)
    }
}
