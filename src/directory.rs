//! Read-only collaborator lookups the core consumes but does not own.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

/// Display record for a shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopInfo {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub food_kind: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub address_region: Option<String>,
    #[serde(default)]
    pub thumbnail_img: Option<String>,
}

/// Public profile record for a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub nickname: String,
    #[serde(default)]
    pub profile_image: Option<String>,
}

/// Shop decoration lookups. Ids with no record are simply absent from the
/// returned map.
pub trait ShopDirectory: Send + Sync {
    fn shops_by_ids<'a>(
        &'a self,
        ids: &'a [i64],
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<HashMap<i64, ShopInfo>>> + Send + 'a>>;
}

/// User profile lookups for public share payloads.
pub trait UserDirectory: Send + Sync {
    fn user_by_id<'a>(
        &'a self,
        user_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Option<UserInfo>>> + Send + 'a>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shop_info_deserializes_with_missing_optionals() {
        let info: ShopInfo = serde_json::from_str(r#"{"id": 7, "name": "Noodle Bar"}"#).unwrap();
        assert_eq!(info.id, 7);
        assert_eq!(info.food_kind, None);
        assert_eq!(info.thumbnail_img, None);
    }

    #[test]
    fn user_info_round_trips() {
        let info = UserInfo {
            nickname: "dana".into(),
            profile_image: Some("https://example.com/p.jpg".into()),
        };
        let json = serde_json::to_string(&info).unwrap();
        let back: UserInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, info);
    }
}
