use crate::modules::audio::model::AudioAsset;
use bson::{doc, oid::ObjectId};
use mongodb::{Collection, Database};

const COLLECTION_NAME: &str = "audio_assets";

pub struct AudioCrud {
    collection: Collection<AudioAsset>,
}

impl AudioCrud {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_NAME),
        }
    }

    pub async fn create(&self, asset: AudioAsset) -> Result<ObjectId, mongodb::error::Error> {
        let result = self.collection.insert_one(asset).await?;
        Ok(result.inserted_id.as_object_id().unwrap())
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<AudioAsset>, mongodb::error::Error> {
        self.collection.find_one(doc! { "_id": id }).await
    }

    pub async fn delete(&self, id: &ObjectId) -> Result<bool, mongodb::error::Error> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}
