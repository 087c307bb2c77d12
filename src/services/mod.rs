pub mod llm;
pub mod notify;
pub mod pipeline;
pub mod probe;
pub mod speech;
pub mod storage;
pub mod summarize;
pub mod transcode;
