//! Gender resource models and DTOs
//!
//! The JSON shape is fixed: `{"Id": integer, "Name": string, "isActive": boolean}`.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A gender record as stored and as returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Gender {
    /// The gender unique identifier
    #[serde(rename = "Id")]
    #[schema(read_only, example = 1)]
    pub id: i32,
    /// The gender name
    #[serde(rename = "Name")]
    #[schema(example = "Female")]
    pub name: String,
    /// Is the gender active
    #[serde(rename = "isActive")]
    pub is_active: bool,
}

/// Request body for `POST /genders`
///
/// `isActive` is accepted for symmetry with the resource shape but ignored:
/// new records are always stored active.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateGenderRequest {
    /// The gender name
    #[serde(rename = "Name")]
    #[schema(max_length = 255, example = "Female")]
    #[validate(length(max = 255, message = "Name must be at most 255 characters"))]
    pub name: String,

    /// Ignored, new records are always active
    #[serde(rename = "isActive", default)]
    #[allow(dead_code)]
    pub is_active: Option<bool>,
}

/// Request body for `PUT /genders/{id}`
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateGenderRequest {
    /// The gender name
    #[serde(rename = "Name")]
    #[schema(max_length = 255, example = "Female")]
    #[validate(length(max = 255, message = "Name must be at most 255 characters"))]
    pub name: String,

    /// Is the gender active
    #[serde(rename = "isActive")]
    pub is_active: bool,
}

impl UpdateGenderRequest {
    /// Echo the submitted body back under the path id
    pub fn into_gender(self, id: i32) -> Gender {
        Gender {
            id,
            name: self.name,
            is_active: self.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_gender_wire_shape() {
        let gender = Gender {
            id: 3,
            name: "Female".to_string(),
            is_active: true,
        };

        assert_eq!(
            serde_json::to_value(&gender).unwrap(),
            json!({"Id": 3, "Name": "Female", "isActive": true})
        );
    }

    #[test]
    fn test_create_request_ignores_is_active_and_extra_fields() {
        let req: CreateGenderRequest =
            serde_json::from_value(json!({"Name": "Male", "isActive": false, "Id": 99})).unwrap();
        assert_eq!(req.name, "Male");
        assert_eq!(req.is_active, Some(false));

        let req: CreateGenderRequest = serde_json::from_value(json!({"Name": "Male"})).unwrap();
        assert_eq!(req.is_active, None);
    }

    #[test]
    fn test_create_request_requires_name() {
        let result = serde_json::from_value::<CreateGenderRequest>(json!({"isActive": true}));
        assert!(result.is_err());
    }

    #[test]
    fn test_update_request_requires_both_fields() {
        assert!(serde_json::from_value::<UpdateGenderRequest>(json!({"Name": "X"})).is_err());
        assert!(serde_json::from_value::<UpdateGenderRequest>(json!({"isActive": true})).is_err());
    }

    #[test]
    fn test_name_length_limit() {
        let long = "x".repeat(256);
        let req = CreateGenderRequest {
            name: long,
            is_active: None,
        };
        assert!(req.validate().is_err());

        let req = UpdateGenderRequest {
            name: "Non-binary".to_string(),
            is_active: true,
        };
        assert!(req.validate().is_ok());
        assert_eq!(
            req.into_gender(12),
            Gender {
                id: 12,
                name: "Non-binary".to_string(),
                is_active: true,
            }
        );
    }
}
