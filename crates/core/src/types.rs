/// All entity primary keys are PostgreSQL UUIDs, serialized as strings.
pub type EntityId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
