//! Structural contracts for the transported resource payloads.
//!
//! The core transports, caches, and returns these records verbatim; beyond an
//! identifier their fields are opaque server-defined JSON, kept intact through
//! a flattened remainder so cached copies round-trip byte-for-byte.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

macro_rules! opaque_resource {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub struct $name {
            /// Server-assigned identifier.
            pub id: Value,
            /// Remaining server-defined fields, preserved verbatim.
            #[serde(flatten)]
            pub fields: Map<String, Value>,
        }
    };
}

opaque_resource! {
    /// A photographic work, submitted or featured.
    Work
}

opaque_resource! {
    /// A message-board entry.
    Message
}

opaque_resource! {
    /// A voting activity grouping candidate works.
    VotingActivity
}

opaque_resource! {
    /// A knowledge-base article.
    KnowledgeItem
}

#[cfg(test)]
mod tests {
    //! Round-trip coverage for the opaque remainder.

    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_fields_survive_a_cache_round_trip() {
        let raw = json!({
            "id": "w-9",
            "title": "晨雾",
            "exif": { "iso": 100 }
        });
        let work: Work = serde_json::from_value(raw.clone()).expect("work decodes");
        assert_eq!(work.id, json!("w-9"));
        assert_eq!(
            serde_json::to_value(&work).expect("work encodes"),
            raw,
            "opaque fields must be preserved verbatim"
        );
    }

    #[test]
    fn numeric_identifiers_are_accepted() {
        let message: Message =
            serde_json::from_value(json!({ "id": 41, "content": "hi" })).expect("message decodes");
        assert_eq!(message.id, json!(41));
    }

    #[test]
    fn records_without_an_identifier_are_rejected() {
        let result: Result<KnowledgeItem, _> = serde_json::from_value(json!({ "title": "光圈" }));
        assert!(result.is_err(), "identifier-less records must not decode");
    }
}
