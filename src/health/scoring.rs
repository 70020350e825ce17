use serde::{Deserialize, Serialize};

/// The four measurements submitted for one analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vitals {
    pub bmi: f64,
    pub heart_rate: f64,
    pub sleep: f64,
    pub bp: f64,
}

/// Classification tier. Stored in `records.risk_level` and serialized to
/// JSON as the exact display strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum RiskLevel {
    #[sqlx(rename = "Low Risk")]
    #[serde(rename = "Low Risk")]
    Low,
    #[sqlx(rename = "Moderate Risk")]
    #[serde(rename = "Moderate Risk")]
    Moderate,
    #[sqlx(rename = "High Risk")]
    #[serde(rename = "High Risk")]
    High,
}

impl RiskLevel {
    /// First matching tier for a total score. The ranges partition 0..=8
    /// without overlap: 0-2 low, 3-5 moderate, 6-8 high.
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=2 => RiskLevel::Low,
            3..=5 => RiskLevel::Moderate,
            _ => RiskLevel::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Moderate => "Moderate Risk",
            RiskLevel::High => "High Risk",
        }
    }

    /// Canned guidance attached to every record of this tier; never set
    /// independently of the level.
    pub fn recommendation(&self) -> &'static str {
        match self {
            RiskLevel::Low => {
                "Maintain healthy lifestyle. Continue balanced diet and regular exercise."
            }
            RiskLevel::Moderate => {
                "Improve diet, increase physical activity, and monitor vitals regularly."
            }
            RiskLevel::High => "Consult a doctor immediately and monitor health indicators daily.",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of scoring one set of vitals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assessment {
    pub score: u8,
    pub level: RiskLevel,
}

impl Assessment {
    pub fn recommendation(&self) -> &'static str {
        self.level.recommendation()
    }
}

/// Rule-based scoring. Each metric contributes independently and at most
/// once:
///
///   bmi        > 30  -> +2, else > 25 -> +1
///   heart_rate > 100 -> +2
///   sleep      < 6   -> +2
///   bp         > 140 -> +2
///
/// Total for every finite input; the caller parses and validates the raw
/// numbers before this point.
pub fn assess(vitals: &Vitals) -> Assessment {
    let mut score: u8 = 0;

    if vitals.bmi > 30.0 {
        score += 2;
    } else if vitals.bmi > 25.0 {
        score += 1;
    }

    if vitals.heart_rate > 100.0 {
        score += 2;
    }

    if vitals.sleep < 6.0 {
        score += 2;
    }

    if vitals.bp > 140.0 {
        score += 2;
    }

    Assessment {
        score,
        level: RiskLevel::from_score(score),
    }
}
