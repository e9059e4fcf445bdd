//! BMI calculator.
//!
//! `bmi = weight / height²`, with the usual four adult categories.

use serde::Serialize;

use super::{Tool, ToolError};
use crate::session::Session;
use crate::types::{Command, Field, FieldSpec, Mode, Report, Values};

const FIELDS: FieldSpec = &[
    Field::decimal("weight", "Weight (kg)").positive().range(1.0, 1000.0),
    Field::decimal("height", "Height (m)").positive().range(0.1, 3.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Each threshold belongs to the category above it.
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

    pub fn label(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

pub fn bmi(weight_kg: f64, height_m: f64) -> f64 {
    weight_kg / (height_m * height_m)
}

pub struct BmiTool;

impl Tool for BmiTool {
    fn command(&self) -> Command {
        Command::Bmi
    }

    fn description(&self) -> &str {
        "Body mass index from weight and height, with its category."
    }

    fn mode(&self) -> Mode {
        Mode::Modal
    }

    fn fields(&self) -> FieldSpec {
        FIELDS
    }

    fn execute(&self, values: &Values, _session: &mut Session) -> Result<Report, ToolError> {
        let weight = values.decimal("weight")?;
        let height = values.decimal("height")?;
        let index = bmi(weight, height);
        let category = BmiCategory::from_bmi(index);

        Ok(Report::success(Command::Bmi, self.title())
            .line(format!("Your BMI: {:.2}", index))
            .line(format!("Category: {}", category.label()))
            .value("bmi", index)
            .value("category", category.label()))
    }
}
