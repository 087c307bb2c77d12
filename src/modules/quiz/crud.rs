use crate::modules::quiz::model::Quiz;
use bson::{doc, oid::ObjectId};
use mongodb::{Collection, Database};
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

const COLLECTION_NAME: &str = "quizzes";
const CACHE_TTL: u64 = 3600; // 1 hour

pub struct QuizCrud {
    collection: Collection<Quiz>,
    redis: ConnectionManager,
}

impl QuizCrud {
    pub fn new(db: &Database, redis: ConnectionManager) -> Self {
        Self {
            collection: db.collection(COLLECTION_NAME),
            redis,
        }
    }

    fn cache_key(id: &ObjectId) -> String {
        format!("quiz:{}", id.to_hex())
    }

    pub async fn create(&self, quiz: Quiz) -> Result<ObjectId, mongodb::error::Error> {
        let result = self.collection.insert_one(quiz).await?;
        Ok(result.inserted_id.as_object_id().unwrap())
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Quiz>, mongodb::error::Error> {
        // Try cache first
        let cache_key = Self::cache_key(id);
        let mut redis = self.redis.clone();

        if let Ok(cached) = redis.get::<_, String>(&cache_key).await {
            if let Ok(quiz) = serde_json::from_str::<Quiz>(&cached) {
                return Ok(Some(quiz));
            }
        }

        // Fallback to database
        let quiz = self.collection.find_one(doc! { "_id": id }).await?;

        // Cache the result
        if let Some(ref q) = quiz {
            if let Ok(json) = serde_json::to_string(q) {
                let _: Result<(), _> = redis.set_ex(&cache_key, json, CACHE_TTL).await;
            }
        }

        Ok(quiz)
    }

    pub async fn delete(&self, id: &ObjectId) -> Result<bool, mongodb::error::Error> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;

        // Invalidate cache
        let cache_key = Self::cache_key(id);
        let mut redis = self.redis.clone();
        let _: Result<(), _> = redis.del(&cache_key).await;

        Ok(result.deleted_count > 0)
    }
}
