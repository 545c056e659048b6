//! Patient feature types for diabetes risk classification.
//!
//! The schema is fixed: seven named attributes in the order the model
//! artifact was trained on.

use serde::{Deserialize, Serialize};

/// Number of features in the classifier input schema.
pub const FEATURE_COUNT: usize = 7;

/// Feature names in model input order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "age",
    "hypertension",
    "heart_disease",
    "bmi",
    "HbA1c_level",
    "blood_glucose_level",
    "smoking_history_former",
];

/// Inclusive input ranges, in the same order as [`FEATURE_NAMES`].
pub const FEATURE_RANGES: [(f64, f64); FEATURE_COUNT] = [
    (0.0, 120.0),
    (0.0, 1.0),
    (0.0, 1.0),
    (0.0, 100.0),
    (0.0, 20.0),
    (0.0, 500.0),
    (0.0, 1.0),
];

/// Clinical attributes of one patient, as captured by the input form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatientFeatures {
    /// Age in whole years (0-120)
    pub age: u8,

    /// Diagnosed hypertension
    pub hypertension: bool,

    /// Diagnosed heart disease
    pub heart_disease: bool,

    /// Body mass index (0-100)
    pub bmi: f64,

    /// Glycated haemoglobin in % (0-20)
    #[serde(rename = "HbA1c_level")]
    pub hba1c_level: f64,

    /// Blood glucose in mg/dL (0-500)
    pub blood_glucose_level: f64,

    /// Former smoker
    pub smoking_history_former: bool,
}

impl Default for PatientFeatures {
    /// Form defaults shown before the user edits anything.
    fn default() -> Self {
        Self {
            age: 30,
            hypertension: false,
            heart_disease: false,
            bmi: 25.0,
            hba1c_level: 5.5,
            blood_glucose_level: 100.0,
            smoking_history_former: false,
        }
    }
}

impl PatientFeatures {
    /// Flatten into the model's numeric row, flags encoded as 0/1.
    #[must_use]
    pub fn to_vector(&self) -> FeatureVector {
        FeatureVector([
            f64::from(self.age),
            flag(self.hypertension),
            flag(self.heart_disease),
            self.bmi,
            self.hba1c_level,
            self.blood_glucose_level,
            flag(self.smoking_history_former),
        ])
    }

    /// Build features from a numeric row in schema order.
    ///
    /// # Errors
    /// Returns an error if the row has the wrong length, a flag is not 0 or 1,
    /// or the age is not a whole number of years.
    pub fn from_values(values: &[f64]) -> Result<Self, String> {
        if values.len() != FEATURE_COUNT {
            return Err(format!(
                "Expected {} features, got {}",
                FEATURE_COUNT,
                values.len()
            ));
        }

        let age = values[0];
        if age.fract() != 0.0 || !(0.0..=f64::from(u8::MAX)).contains(&age) {
            return Err(format!("Age {age} must be a whole number of years"));
        }

        Ok(Self {
            age: age as u8,
            hypertension: parse_flag(FEATURE_NAMES[1], values[1])?,
            heart_disease: parse_flag(FEATURE_NAMES[2], values[2])?,
            bmi: values[3],
            hba1c_level: values[4],
            blood_glucose_level: values[5],
            smoking_history_former: parse_flag(FEATURE_NAMES[6], values[6])?,
        })
    }

    /// Validate that all features are within the form's ranges.
    ///
    /// # Errors
    /// Returns every violation found, one message per field.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let errors: Vec<String> = self
            .to_vector()
            .as_slice()
            .iter()
            .zip(FEATURE_NAMES.iter().zip(FEATURE_RANGES.iter()))
            .filter(|(value, (_, (min, max)))| !value.is_finite() || **value < *min || **value > *max)
            .map(|(value, (name, (min, max)))| {
                format!("{name} {value} out of range [{min}, {max}]")
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

fn parse_flag(name: &str, value: f64) -> Result<bool, String> {
    if value == 0.0 {
        Ok(false)
    } else if value == 1.0 {
        Ok(true)
    } else {
        Err(format!("{name} {value} must be 0 or 1"))
    }
}

/// One model input row: the seven features in schema order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Value of the feature at `index`, if it exists.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }
}
