use serde::Serialize;
use strum_macros::Display;

use crate::error::{Result, TrendError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodyMassIndex {
    pub value: f64,
    pub category: BmiCategory,
}

/// BMI = weight (kg) / height (m)^2
pub fn body_mass_index(weight_kg: f64, height_m: f64) -> Result<BodyMassIndex> {
    if !height_m.is_finite() || height_m <= 0.0 {
        return Err(TrendError::invalid_parameter(format!(
            "height must be > 0 m, got {}",
            height_m
        )));
    }
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(TrendError::invalid_parameter(format!(
            "weight must be > 0 kg, got {}",
            weight_kg
        )));
    }

    let value = weight_kg / (height_m * height_m);
    Ok(BodyMassIndex {
        value,
        category: BmiCategory::from_bmi(value),
    })
}
