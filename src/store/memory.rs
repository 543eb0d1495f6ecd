use std::sync::Mutex;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use super::UserStore;
use crate::users::repo_types::{NewUser, UserDocument};

/// Insertion-ordered store for handler tests.
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<UserDocument>>,
}

impl MemoryUserStore {
    pub fn snapshot(&self) -> Vec<UserDocument> {
        self.users.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: NewUser) -> anyhow::Result<UserDocument> {
        let doc = user.into_document(ObjectId::new());
        self.users.lock().unwrap().push(doc.clone());
        Ok(doc)
    }

    async fn find_first(&self) -> anyhow::Result<Option<UserDocument>> {
        Ok(self.users.lock().unwrap().first().cloned())
    }

    async fn set_profile_pic(
        &self,
        id: ObjectId,
        profile_pic: &str,
    ) -> anyhow::Result<Option<UserDocument>> {
        let mut users = self.users.lock().unwrap();
        Ok(users.iter_mut().find(|u| u.id == id).map(|u| {
            u.profile_pic = Some(profile_pic.to_string());
            u.clone()
        }))
    }

    async fn delete(&self, id: ObjectId) -> anyhow::Result<Option<UserDocument>> {
        let mut users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .position(|u| u.id == id)
            .map(|idx| users.remove(idx)))
    }

    async fn close(&self) {}
}
