use crate::modules::user::model::{SavedSummary, User};
use bson::{doc, oid::ObjectId};
use mongodb::{Collection, Database};

const COLLECTION_NAME: &str = "users";

pub struct UserCrud {
    collection: Collection<User>,
}

impl UserCrud {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_NAME),
        }
    }

    pub async fn create(&self, user: User) -> Result<ObjectId, mongodb::error::Error> {
        let result = self.collection.insert_one(user).await?;
        Ok(result.inserted_id.as_object_id().unwrap())
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, mongodb::error::Error> {
        self.collection.find_one(doc! { "_id": id }).await
    }

    pub async fn push_saved_summary(
        &self,
        id: &ObjectId,
        summary: SavedSummary,
    ) -> Result<bool, mongodb::error::Error> {
        let entry = bson::to_bson(&summary)?;
        let result = self
            .collection
            .update_one(
                doc! { "_id": id },
                doc! { "$push": { "saved_summaries": entry } },
            )
            .await?;
        Ok(result.modified_count > 0)
    }
}
