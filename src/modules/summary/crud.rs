use crate::modules::summary::model::SummaryRecord;
use bson::{doc, oid::ObjectId};
use mongodb::{Collection, Database};

const COLLECTION_NAME: &str = "summaries";

pub struct SummaryCrud {
    collection: Collection<SummaryRecord>,
}

impl SummaryCrud {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_NAME),
        }
    }

    pub async fn create(&self, summary: SummaryRecord) -> Result<ObjectId, mongodb::error::Error> {
        let result = self.collection.insert_one(summary).await?;
        Ok(result.inserted_id.as_object_id().unwrap())
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<SummaryRecord>, mongodb::error::Error> {
        self.collection.find_one(doc! { "_id": id }).await
    }

    pub async fn find_by_user(&self, user_id: &ObjectId) -> Result<Vec<SummaryRecord>, mongodb::error::Error> {
        use futures::TryStreamExt;

        let cursor = self
            .collection
            .find(doc! { "user_id": user_id })
            .sort(doc! { "date": -1 })
            .await?;

        cursor.try_collect().await
    }

    pub async fn update(
        &self,
        id: &ObjectId,
        user_id: &ObjectId,
        topic: String,
        points: Vec<String>,
    ) -> Result<bool, mongodb::error::Error> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": id, "user_id": user_id },
                doc! { "$set": { "topic": topic, "points": points } },
            )
            .await?;
        Ok(result.modified_count > 0)
    }

    pub async fn delete(&self, id: &ObjectId, user_id: &ObjectId) -> Result<bool, mongodb::error::Error> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id, "user_id": user_id })
            .await?;
        Ok(result.deleted_count > 0)
    }
}
