//! Body-mass-index banding for assessment cards.

use std::fmt;

/// Body-mass-index band shown on an assessment card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImcBand {
    Unknown,
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl ImcBand {
    /// Classifies a BMI value. Missing, zero and NaN values are `Unknown`.
    /// Anything else below 18.5, negatives included, is `Underweight`.
    pub fn classify(imc: Option<f64>) -> Self {
        match imc {
            None => Self::Unknown,
            Some(v) if v == 0.0 || v.is_nan() => Self::Unknown,
            Some(v) if v < 18.5 => Self::Underweight,
            Some(v) if v < 25.0 => Self::Normal,
            Some(v) if v < 30.0 => Self::Overweight,
            Some(_) => Self::Obese,
        }
    }

    /// Classifies a BMI as the backend sends it, which is sometimes a
    /// string. Unparseable text is `Unknown`.
    pub fn classify_raw(raw: &str) -> Self {
        Self::classify(raw.trim().parse::<f64>().ok())
    }

    /// BMI from weight (kg) and height (m), or `None` when either is not a
    /// positive number.
    pub fn compute(weight_kg: f64, height_m: f64) -> Option<f64> {
        (weight_kg > 0.0 && height_m > 0.0).then(|| weight_kg / (height_m * height_m))
    }

    /// Label as printed on the dashboard.
    pub fn label(self) -> &'static str {
        match self {
            Self::Unknown => "N/A",
            Self::Underweight => "Abaixo",
            Self::Normal => "Normal",
            Self::Overweight => "Sobrepeso",
            Self::Obese => "Obesidade",
        }
    }
}

impl fmt::Display for ImcBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
