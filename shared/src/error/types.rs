//! Error payload structures

use serde::{Deserialize, Serialize};

use super::codes::ErrorCode;
use crate::types::{IngredientId, Qty};

/// Generic error payload: `{error, code}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message
    pub error: String,
    /// Machine-matchable code
    pub code: ErrorCode,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            error: message.into(),
            code,
        }
    }
}

/// Per-ingredient shortfall inside an insufficient-ingredients conflict
///
/// One entry per ingredient that cannot cover the recipe-expanded request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientShortfall {
    pub ingredient_id: IngredientId,
    pub ingredient_name: String,
    pub message: String,
    pub required_qty: Qty,
    pub available_qty: Qty,
    pub is_out: bool,
}

impl IngredientShortfall {
    pub fn new(
        ingredient_id: IngredientId,
        ingredient_name: impl Into<String>,
        required_qty: Qty,
        available_qty: Qty,
        is_out: bool,
    ) -> Self {
        let name = ingredient_name.into();
        Self {
            ingredient_id,
            message: format!("Insufficient {name}"),
            ingredient_name: name,
            required_qty,
            available_qty,
            is_out,
        }
    }
}

/// 409 conflict payload: `{code: "INSUFFICIENT_INGREDIENTS", errors: [...]}`
///
/// Fixed contract consumed by ordering clients; `errors` is ordered by
/// ingredient id ascending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictBody {
    pub code: ErrorCode,
    pub errors: Vec<IngredientShortfall>,
}

impl ConflictBody {
    pub fn insufficient_ingredients(errors: Vec<IngredientShortfall>) -> Self {
        Self {
            code: ErrorCode::InsufficientIngredients,
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_body_matches_wire_contract() {
        let body = ConflictBody::insufficient_ingredients(vec![IngredientShortfall::new(
            7, "Tomatoes", 4, 2, false,
        )]);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["code"], "INSUFFICIENT_INGREDIENTS");
        assert_eq!(json["errors"][0]["ingredient_name"], "Tomatoes");
        assert_eq!(json["errors"][0]["required_qty"], 4);
        assert_eq!(json["errors"][0]["available_qty"], 2);
        assert_eq!(json["errors"][0]["is_out"], false);
        assert_eq!(json["errors"][0]["message"], "Insufficient Tomatoes");
    }
}
