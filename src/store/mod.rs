use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::users::repo_types::{NewUser, UserDocument};

#[cfg(test)]
pub mod memory;
pub mod mongo;

/// Persistence for user documents. Every method maps to exactly one store call.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Stores a new user under a freshly generated id.
    async fn insert(&self, user: NewUser) -> anyhow::Result<UserDocument>;

    /// First document in the store's natural order, whatever that is.
    async fn find_first(&self) -> anyhow::Result<Option<UserDocument>>;

    /// Replaces only `profilePic` and returns the updated document.
    async fn set_profile_pic(
        &self,
        id: ObjectId,
        profile_pic: &str,
    ) -> anyhow::Result<Option<UserDocument>>;

    /// Removes the document and returns it, `None` if nothing matched.
    async fn delete(&self, id: ObjectId) -> anyhow::Result<Option<UserDocument>>;

    async fn close(&self);
}
