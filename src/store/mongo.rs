use anyhow::Context;
use async_trait::async_trait;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::ReturnDocument,
    Client, Collection,
};
use tracing::{error, info};

use super::UserStore;
use crate::config::AppConfig;
use crate::users::repo_types::{NewUser, UserDocument};

const DEFAULT_DATABASE: &str = "test";
const USERS_COLLECTION: &str = "users";

#[derive(Clone)]
pub struct MongoUserStore {
    client: Client,
    users: Collection<UserDocument>,
}

impl MongoUserStore {
    /// Builds the client and pings the server. A failed ping aborts only when
    /// `fail_fast_on_connect_error` is set.
    pub async fn connect(config: &AppConfig) -> anyhow::Result<Self> {
        let client = Client::with_uri_str(&config.connection_string)
            .await
            .context("parse MongoDB connection string")?;

        let db = match &config.database {
            Some(name) => client.database(name),
            None => client
                .default_database()
                .unwrap_or_else(|| client.database(DEFAULT_DATABASE)),
        };

        match db.run_command(doc! { "ping": 1 }).await {
            Ok(_) => info!(database = %db.name(), "MongoDB connected"),
            Err(e) if config.fail_fast_on_connect_error => {
                return Err(e).context("connect to MongoDB");
            }
            Err(e) => {
                error!(error = %e, database = %db.name(), "MongoDB connection failed; continuing");
            }
        }

        Ok(Self {
            users: db.collection(USERS_COLLECTION),
            client,
        })
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn insert(&self, user: NewUser) -> anyhow::Result<UserDocument> {
        let doc = user.into_document(ObjectId::new());
        self.users
            .insert_one(&doc)
            .await
            .context("mongo insert_one")?;
        Ok(doc)
    }

    async fn find_first(&self) -> anyhow::Result<Option<UserDocument>> {
        let user = self
            .users
            .find_one(doc! {})
            .await
            .context("mongo find_one")?;
        Ok(user)
    }

    async fn set_profile_pic(
        &self,
        id: ObjectId,
        profile_pic: &str,
    ) -> anyhow::Result<Option<UserDocument>> {
        let user = self
            .users
            .find_one_and_update(
                doc! { "_id": id },
                doc! { "$set": { "profilePic": profile_pic } },
            )
            .return_document(ReturnDocument::After)
            .await
            .context("mongo find_one_and_update")?;
        Ok(user)
    }

    async fn delete(&self, id: ObjectId) -> anyhow::Result<Option<UserDocument>> {
        let user = self
            .users
            .find_one_and_delete(doc! { "_id": id })
            .await
            .context("mongo find_one_and_delete")?;
        Ok(user)
    }

    async fn close(&self) {
        self.client.clone().shutdown().await;
        info!("MongoDB client closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Nothing listens on port 1, so server selection fails fast.
    const UNREACHABLE_URI: &str = "mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=200";

    fn config(connection_string: &str, fail_fast_on_connect_error: bool) -> AppConfig {
        AppConfig {
            connection_string: connection_string.into(),
            database: None,
            host: "127.0.0.1".into(),
            port: 0,
            environment: "test".into(),
            fail_fast_on_connect_error,
        }
    }

    #[tokio::test]
    async fn unreachable_server_aborts_when_failing_fast() {
        let err = MongoUserStore::connect(&config(UNREACHABLE_URI, true))
            .await
            .err()
            .expect("connect should fail");
        assert!(err.to_string().contains("connect to MongoDB"));
    }

    #[tokio::test]
    async fn unreachable_server_is_tolerated_without_fail_fast() {
        let store = MongoUserStore::connect(&config(UNREACHABLE_URI, false))
            .await
            .expect("connect should continue past a failed ping");
        assert_eq!(store.users.name(), "users");
        assert_eq!(store.users.namespace().db, "test");
        store.close().await;
    }

    #[tokio::test]
    async fn unparsable_uri_always_aborts() {
        for fail_fast in [true, false] {
            let err = MongoUserStore::connect(&config("not-a-mongodb-uri", fail_fast))
                .await
                .err()
                .expect("connect should fail");
            assert!(err.to_string().contains("parse MongoDB connection string"));
        }
    }
}
