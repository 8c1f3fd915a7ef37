use serde::{Deserialize, Serialize};

// Missing fields deserialize to their defaults so that an incomplete body
// reaches validation and gets the 400 the API contract promises, instead
// of an extractor rejection.

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameRequest {
    #[serde(default)]
    pub player_name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinGameRequest {
    #[serde(default)]
    pub game_id: String,
    #[serde(default)]
    pub player_name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    #[serde(default)]
    pub game_id: String,
    #[serde(default)]
    pub player_name: String,
    pub row: Option<i32>,
    pub col: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_game_request_deserialization() {
        let request: CreateGameRequest =
            serde_json::from_str(r#"{"playerName":"Alice"}"#).unwrap();
        assert_eq!(request.player_name, "Alice");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let request: CreateGameRequest = serde_json::from_str("{}").unwrap();
        assert!(request.player_name.is_empty());

        let request: JoinGameRequest = serde_json::from_str("{}").unwrap();
        assert!(request.game_id.is_empty());
        assert!(request.player_name.is_empty());
    }

    #[test]
    fn test_move_request_deserialization() {
        let request: MoveRequest =
            serde_json::from_str(r#"{"gameId":"g1","playerName":"Alice","row":0,"col":2}"#)
                .unwrap();
        assert_eq!(request.game_id, "g1");
        assert_eq!(request.player_name, "Alice");
        assert_eq!(request.row, Some(0));
        assert_eq!(request.col, Some(2));
    }

    #[test]
    fn test_move_request_missing_position() {
        let request: MoveRequest =
            serde_json::from_str(r#"{"gameId":"g1","playerName":"Alice"}"#).unwrap();
        assert!(request.row.is_none());
        assert!(request.col.is_none());
    }
}
