//! GraphQL schema builder for Inkwell
//!
//! This module provides the schema construction for the async-graphql API.

use async_graphql::{dataloader::DataLoader, EmptySubscription, Schema};

use crate::repositories::Store;
use crate::services::{AuthService, PostService, ProfileService};

use super::loaders::UserLoader;
use super::mutation::Mutation;
use super::query::Query;

/// The Inkwell GraphQL schema type
pub type InkwellSchema = Schema<Query, Mutation, EmptySubscription>;

/// Builder for constructing the GraphQL schema with required services
pub struct SchemaBuilder {
    store: Option<Store>,
    auth_service: Option<AuthService>,
}

impl SchemaBuilder {
    /// Create a new schema builder
    pub fn new() -> Self {
        Self {
            store: None,
            auth_service: None,
        }
    }

    /// Set the persistence backend
    pub fn store(mut self, store: Store) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the auth service
    pub fn auth_service(mut self, auth_service: AuthService) -> Self {
        self.auth_service = Some(auth_service);
        self
    }

    /// Build the schema with all configured services
    ///
    /// # Panics
    /// Panics if required services (store, auth_service) are not configured
    pub fn build(self) -> InkwellSchema {
        let store = self.store.expect("store is required");
        let auth_service = self.auth_service.expect("auth service is required");

        let post_service = PostService::new(store.users.clone(), store.posts.clone());
        let profile_service = ProfileService::new(store.users.clone());
        let user_loader = DataLoader::new(UserLoader::new(store.users.clone()), tokio::spawn);

        Schema::build(Query::default(), Mutation::default(), EmptySubscription)
            .data(auth_service)
            .data(post_service)
            .data(profile_service)
            .data(user_loader)
            .finish()
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a new GraphQL schema with the provided services
pub fn build_schema(store: Store, auth_service: AuthService) -> InkwellSchema {
    SchemaBuilder::new()
        .store(store)
        .auth_service(auth_service)
        .build()
}
