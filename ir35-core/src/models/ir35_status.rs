use serde::{Deserialize, Serialize};

/// IR35 determination for an engagement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ir35Status {
    Inside,
    Outside,
}

impl Ir35Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inside => "inside",
            Self::Outside => "outside",
        }
    }

    /// Case-insensitive parse of `inside` / `outside`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inside" => Some(Self::Inside),
            "outside" => Some(Self::Outside),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Inside => "Inside IR35",
            Self::Outside => "Outside IR35",
        }
    }

    /// The vehicle earnings are taken through under this status.
    pub fn vehicle(&self) -> EngagementVehicle {
        match self {
            Self::Inside => EngagementVehicle::UmbrellaInsideIr35,
            Self::Outside => EngagementVehicle::LimitedCompanyOutsideIr35,
        }
    }
}

/// How contract income reaches the worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngagementVehicle {
    /// Corporation tax on profits, then salary plus dividends.
    LimitedCompanyOutsideIr35,
    /// PAYE employment through an umbrella company.
    UmbrellaInsideIr35,
}

impl EngagementVehicle {
    pub fn label(&self) -> &'static str {
        match self {
            Self::LimitedCompanyOutsideIr35 => "Limited company",
            Self::UmbrellaInsideIr35 => "Umbrella company (PAYE)",
        }
    }
}
