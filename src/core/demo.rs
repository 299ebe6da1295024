//! Sample payload for `rekey demo`: a user list whose `id` becomes `userId`.

use crate::schema::Schema;
use serde_json::{json, Value};

pub fn sample_payload() -> Value {
    json!([
        {
            "id": "0",
            "name": "John",
            "follow": 1,
            "following": 2
        },
        {
            "id": "1",
            "name": "Maria",
            "follow": 2,
            "following": 3
        }
    ])
}

pub fn sample_schema() -> Schema {
    [("id", "userId")].into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::transform;

    #[test]
    fn demo_renames_id_only() {
        let mapped = transform(&sample_payload(), &sample_schema());
        assert_eq!(
            mapped,
            json!([
                {"userId": "0", "name": "John", "follow": 1, "following": 2},
                {"userId": "1", "name": "Maria", "follow": 2, "following": 3}
            ])
        );
    }
}
