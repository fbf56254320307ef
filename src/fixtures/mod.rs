//! Sample API payloads for tests.

use serde_json::{json, Value};

/// A single topic
pub fn topic_json(name: &str) -> Value {
    json!({
        "topicName": name,
        "keyType": "STRING",
        "valueType": "AVRO",
        "partitions": 3,
        "replication": 1,
        "isControlTopic": false,
        "messageCount": 1200,
        "configs": [
            {"configKey": "cleanup.policy", "value": "delete", "defaultValue": "delete", "isDefault": true}
        ]
    })
}

/// A topic listing with one user topic and one internal topic
pub fn topics_json() -> Value {
    let mut internal = topic_json("__consumer_offsets");
    internal["isControlTopic"] = json!(true);
    internal["partitions"] = json!(50);
    json!([topic_json("orders"), internal])
}

/// A file source connector with one task
pub fn connector_json(name: &str) -> Value {
    json!({
        "name": name,
        "config": {
            "connector.class": "FileStreamSource",
            "topic": "lines",
            "name": name
        },
        "tasks": [{"connector": name, "task": 0}],
        "type": "source"
    })
}

/// A raised alert
pub fn alert_json(alert_id: u32) -> Value {
    json!({
        "alertId": alert_id,
        "level": "HIGH",
        "category": "Infrastructure",
        "summary": "Broker on host lenses-1 is down",
        "instance": "lenses-1",
        "timestamp": 1_700_000_000_000_i64,
        "tags": ["broker"]
    })
}

/// An audit entry for a topic creation
pub fn audit_json(topic: &str) -> Value {
    json!({
        "type": "TOPIC",
        "change": "ADD",
        "userId": "admin",
        "timestamp": 1_700_000_000_000_i64,
        "content": {"topicName": topic}
    })
}

/// A data policy
pub fn policy_json(id: &str) -> Value {
    json!({
        "id": id,
        "name": "email",
        "category": ["PII"],
        "impactType": "HIGH",
        "obfuscation": "Email",
        "fields": ["email"],
        "versions": 2,
        "lastUpdatedUser": "admin"
    })
}

/// The profile of the logged in user
pub fn user_profile_json() -> Value {
    json!({
        "user": "admin",
        "email": "admin@example.com",
        "permissions": ["ViewKafkaSettings", "ManageUsers"],
        "schemaRegistryDelete": true
    })
}
