use serde::{Deserialize, Deserializer, Serialize};

use crate::health::scoring::{RiskLevel, Vitals};

/// Body of `POST /analyze`. Each vital is accepted as a JSON number or a
/// numeric string, matching how browser form values arrive.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(deserialize_with = "coerce_f64")]
    pub bmi: f64,
    #[serde(deserialize_with = "coerce_f64")]
    pub heart_rate: f64,
    #[serde(deserialize_with = "coerce_f64")]
    pub sleep: f64,
    #[serde(deserialize_with = "coerce_f64")]
    pub bp: f64,
}

impl AnalyzeRequest {
    pub fn vitals(&self) -> Vitals {
        Vitals {
            bmi: self.bmi,
            heart_rate: self.heart_rate,
            sleep: self.sleep,
            bp: self.bp,
        }
    }
}

fn coerce_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(v) => Ok(v),
        Raw::Text(s) => s.trim().parse::<f64>().map_err(serde::de::Error::custom),
    }
}

/// Body of the analysis response.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub recommendation: &'static str,
}
