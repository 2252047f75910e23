use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::GymbookError;

pub const LBS_PER_KG: f64 = 2.20462;
pub const KG_PER_STONE: f64 = 6.35029;
pub const CM_PER_INCH: f64 = 2.54;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
    Stone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    #[default]
    Cm,
    In,
}

impl WeightUnit {
    fn kg_factor(self) -> f64 {
        match self {
            WeightUnit::Kg => 1.0,
            WeightUnit::Lbs => 1.0 / LBS_PER_KG,
            WeightUnit::Stone => KG_PER_STONE,
        }
    }
}

impl LengthUnit {
    fn cm_factor(self) -> f64 {
        match self {
            LengthUnit::Cm => 1.0,
            LengthUnit::In => CM_PER_INCH,
        }
    }
}

pub fn convert_weight(value: f64, from: WeightUnit, to: WeightUnit) -> f64 {
    if from == to {
        return value;
    }
    value * from.kg_factor() / to.kg_factor()
}

pub fn convert_length(value: f64, from: LengthUnit, to: LengthUnit) -> f64 {
    if from == to {
        return value;
    }
    value * from.cm_factor() / to.cm_factor()
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightUnit::Kg => write!(f, "kg"),
            WeightUnit::Lbs => write!(f, "lbs"),
            WeightUnit::Stone => write!(f, "st"),
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LengthUnit::Cm => write!(f, "cm"),
            LengthUnit::In => write!(f, "in"),
        }
    }
}

impl FromStr for WeightUnit {
    type Err = GymbookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kg" | "kgs" | "kilograms" => Ok(WeightUnit::Kg),
            "lb" | "lbs" | "pounds" => Ok(WeightUnit::Lbs),
            "st" | "stone" => Ok(WeightUnit::Stone),
            _ => Err(GymbookError::Parse(s.to_string())),
        }
    }
}

impl FromStr for LengthUnit {
    type Err = GymbookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cm" => Ok(LengthUnit::Cm),
            "in" | "inch" | "inches" => Ok(LengthUnit::In),
            _ => Err(GymbookError::Parse(s.to_string())),
        }
    }
}
