//! Pitch geometry

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::engine::physics_constants::field;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
#[validate(schema(function = "validate_field_box"))]
pub struct FieldConfig {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    /// Gap between the field box and the enclosing walls
    #[validate(range(min = 0.0))]
    pub wall_margin: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            left: field::LEFT,
            right: field::RIGHT,
            top: field::TOP,
            bottom: field::BOTTOM,
            wall_margin: field::WALL_MARGIN,
        }
    }
}

fn validate_field_box(cfg: &FieldConfig) -> Result<(), ValidationError> {
    // The nets need room for the goal mouth.
    if cfg.right - cfg.left < 200.0 || cfg.bottom - cfg.top < 100.0 {
        return Err(ValidationError::new("field_box_too_small"));
    }
    Ok(())
}
