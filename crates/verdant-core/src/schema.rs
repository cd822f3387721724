//! The fixed ESG metric schema.
//!
//! Every asset carries exactly ten metrics grouped in three categories. The
//! schema is closed: [`MetricPath`] enumerates every slot and [`MetricSet`]
//! stores one value per slot, so a metric cannot go missing once a set has
//! been built.
//!
//! | Path | Category |
//! |---|---|
//! | `environmental.CO2_emission` | environmental |
//! | `environmental.water_usage` | environmental |
//! | `environmental.renewable_energy_percentage` | environmental |
//! | `social.board_diversity.female_percentage` | social |
//! | `social.board_diversity.minority_percentage` | social |
//! | `social.employee_satisfaction` | social |
//! | `social.pay_equity_ratio` | social |
//! | `governance.board_independence` | governance |
//! | `governance.ethics_violations` | governance |
//! | `governance.cybersecurity_incidents` | governance |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VerdantError;

// =============================================================================
// CATEGORY
// =============================================================================

/// ESG metric category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Environmental metrics (emissions, water, energy).
    Environmental,
    /// Social metrics (diversity, satisfaction, pay equity).
    Social,
    /// Governance metrics (independence, ethics, security).
    Governance,
}

impl Category {
    /// All categories in document order.
    pub const ALL: [Category; 3] = [Self::Environmental, Self::Social, Self::Governance];

    /// Key used for the category in analysis documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Environmental => "environmental",
            Self::Social => "social",
            Self::Governance => "governance",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// METRIC PATH
// =============================================================================

/// One slot of the fixed metric schema, addressed by its dotted path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MetricPath {
    /// `environmental.CO2_emission`
    #[serde(rename = "environmental.CO2_emission")]
    Co2Emission,
    /// `environmental.water_usage`
    #[serde(rename = "environmental.water_usage")]
    WaterUsage,
    /// `environmental.renewable_energy_percentage`
    #[serde(rename = "environmental.renewable_energy_percentage")]
    RenewableEnergyPercentage,
    /// `social.board_diversity.female_percentage`
    #[serde(rename = "social.board_diversity.female_percentage")]
    BoardDiversityFemale,
    /// `social.board_diversity.minority_percentage`
    #[serde(rename = "social.board_diversity.minority_percentage")]
    BoardDiversityMinority,
    /// `social.employee_satisfaction`
    #[serde(rename = "social.employee_satisfaction")]
    EmployeeSatisfaction,
    /// `social.pay_equity_ratio`
    #[serde(rename = "social.pay_equity_ratio")]
    PayEquityRatio,
    /// `governance.board_independence`
    #[serde(rename = "governance.board_independence")]
    BoardIndependence,
    /// `governance.ethics_violations`
    #[serde(rename = "governance.ethics_violations")]
    EthicsViolations,
    /// `governance.cybersecurity_incidents`
    #[serde(rename = "governance.cybersecurity_incidents")]
    CybersecurityIncidents,
}

impl MetricPath {
    /// Every metric path in document order.
    pub const ALL: [MetricPath; 10] = [
        Self::Co2Emission,
        Self::WaterUsage,
        Self::RenewableEnergyPercentage,
        Self::BoardDiversityFemale,
        Self::BoardDiversityMinority,
        Self::EmployeeSatisfaction,
        Self::PayEquityRatio,
        Self::BoardIndependence,
        Self::EthicsViolations,
        Self::CybersecurityIncidents,
    ];

    /// Dotted path, e.g. `social.board_diversity.female_percentage`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Co2Emission => "environmental.CO2_emission",
            Self::WaterUsage => "environmental.water_usage",
            Self::RenewableEnergyPercentage => "environmental.renewable_energy_percentage",
            Self::BoardDiversityFemale => "social.board_diversity.female_percentage",
            Self::BoardDiversityMinority => "social.board_diversity.minority_percentage",
            Self::EmployeeSatisfaction => "social.employee_satisfaction",
            Self::PayEquityRatio => "social.pay_equity_ratio",
            Self::BoardIndependence => "governance.board_independence",
            Self::EthicsViolations => "governance.ethics_violations",
            Self::CybersecurityIncidents => "governance.cybersecurity_incidents",
        }
    }

    /// Category the metric belongs to.
    #[must_use]
    pub const fn category(self) -> Category {
        match self {
            Self::Co2Emission | Self::WaterUsage | Self::RenewableEnergyPercentage => {
                Category::Environmental
            }
            Self::BoardDiversityFemale
            | Self::BoardDiversityMinority
            | Self::EmployeeSatisfaction
            | Self::PayEquityRatio => Category::Social,
            Self::BoardIndependence | Self::EthicsViolations | Self::CybersecurityIncidents => {
                Category::Governance
            }
        }
    }

    /// Path segments below the `metrics` object, category first.
    pub fn segments(self) -> impl Iterator<Item = &'static str> {
        self.as_str().split('.')
    }

    /// Leaf metric name, e.g. `female_percentage`.
    #[must_use]
    pub fn metric_name(self) -> &'static str {
        self.segments().last().unwrap_or_default()
    }
}

impl fmt::Display for MetricPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricPath {
    type Err = VerdantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|path| path.as_str() == s)
            .ok_or_else(|| VerdantError::invalid_input(s, "not a metric path of the ESG schema"))
    }
}

// =============================================================================
// METRIC SET
// =============================================================================

/// One value per metric of the schema, nested the way analysis documents nest them.
///
/// `MetricSet<MetricSeries>` is an asset's metric block and `MetricSet<f64>` is
/// the fund-wide statistics block; both serialize to the same key layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSet<T> {
    /// Environmental metrics.
    pub environmental: EnvironmentalMetrics<T>,
    /// Social metrics.
    pub social: SocialMetrics<T>,
    /// Governance metrics.
    pub governance: GovernanceMetrics<T>,
}

/// Environmental category block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalMetrics<T> {
    /// Carbon emissions.
    #[serde(rename = "CO2_emission")]
    pub co2_emission: T,
    /// Water usage.
    pub water_usage: T,
    /// Share of energy from renewable sources.
    pub renewable_energy_percentage: T,
}

/// Social category block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialMetrics<T> {
    /// Board diversity group.
    pub board_diversity: BoardDiversity<T>,
    /// Employee satisfaction score.
    pub employee_satisfaction: T,
    /// Pay equity ratio.
    pub pay_equity_ratio: T,
}

/// Nested board diversity group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardDiversity<T> {
    /// Share of female board members.
    pub female_percentage: T,
    /// Share of board members from minorities.
    pub minority_percentage: T,
}

/// Governance category block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GovernanceMetrics<T> {
    /// Share of independent board members.
    pub board_independence: T,
    /// Number of ethics violations.
    pub ethics_violations: T,
    /// Number of cybersecurity incidents.
    pub cybersecurity_incidents: T,
}

impl<T> MetricSet<T> {
    /// Builds a set by calling `f` once per path, in [`MetricPath::ALL`] order.
    pub fn from_fn(mut f: impl FnMut(MetricPath) -> T) -> Self {
        let result: Result<Self, std::convert::Infallible> = Self::try_from_fn(|path| Ok(f(path)));
        match result {
            Ok(set) => set,
            Err(never) => match never {},
        }
    }

    /// Builds a set by calling `f` once per path, stopping at the first error.
    ///
    /// Paths are visited in [`MetricPath::ALL`] order, so the reported error
    /// is always the first failing metric in document order.
    pub fn try_from_fn<E>(mut f: impl FnMut(MetricPath) -> Result<T, E>) -> Result<Self, E> {
        Ok(Self {
            environmental: EnvironmentalMetrics {
                co2_emission: f(MetricPath::Co2Emission)?,
                water_usage: f(MetricPath::WaterUsage)?,
                renewable_energy_percentage: f(MetricPath::RenewableEnergyPercentage)?,
            },
            social: SocialMetrics {
                board_diversity: BoardDiversity {
                    female_percentage: f(MetricPath::BoardDiversityFemale)?,
                    minority_percentage: f(MetricPath::BoardDiversityMinority)?,
                },
                employee_satisfaction: f(MetricPath::EmployeeSatisfaction)?,
                pay_equity_ratio: f(MetricPath::PayEquityRatio)?,
            },
            governance: GovernanceMetrics {
                board_independence: f(MetricPath::BoardIndependence)?,
                ethics_violations: f(MetricPath::EthicsViolations)?,
                cybersecurity_incidents: f(MetricPath::CybersecurityIncidents)?,
            },
        })
    }

    /// Returns the value stored for `path`.
    #[must_use]
    pub fn get(&self, path: MetricPath) -> &T {
        match path {
            MetricPath::Co2Emission => &self.environmental.co2_emission,
            MetricPath::WaterUsage => &self.environmental.water_usage,
            MetricPath::RenewableEnergyPercentage => &self.environmental.renewable_energy_percentage,
            MetricPath::BoardDiversityFemale => &self.social.board_diversity.female_percentage,
            MetricPath::BoardDiversityMinority => &self.social.board_diversity.minority_percentage,
            MetricPath::EmployeeSatisfaction => &self.social.employee_satisfaction,
            MetricPath::PayEquityRatio => &self.social.pay_equity_ratio,
            MetricPath::BoardIndependence => &self.governance.board_independence,
            MetricPath::EthicsViolations => &self.governance.ethics_violations,
            MetricPath::CybersecurityIncidents => &self.governance.cybersecurity_incidents,
        }
    }

    /// Returns a mutable reference to the value stored for `path`.
    pub fn get_mut(&mut self, path: MetricPath) -> &mut T {
        match path {
            MetricPath::Co2Emission => &mut self.environmental.co2_emission,
            MetricPath::WaterUsage => &mut self.environmental.water_usage,
            MetricPath::RenewableEnergyPercentage => {
                &mut self.environmental.renewable_energy_percentage
            }
            MetricPath::BoardDiversityFemale => &mut self.social.board_diversity.female_percentage,
            MetricPath::BoardDiversityMinority => {
                &mut self.social.board_diversity.minority_percentage
            }
            MetricPath::EmployeeSatisfaction => &mut self.social.employee_satisfaction,
            MetricPath::PayEquityRatio => &mut self.social.pay_equity_ratio,
            MetricPath::BoardIndependence => &mut self.governance.board_independence,
            MetricPath::EthicsViolations => &mut self.governance.ethics_violations,
            MetricPath::CybersecurityIncidents => &mut self.governance.cybersecurity_incidents,
        }
    }

    /// Maps every value to a new set with the same layout.
    pub fn map<U>(&self, mut f: impl FnMut(MetricPath, &T) -> U) -> MetricSet<U> {
        MetricSet::from_fn(|path| f(path, self.get(path)))
    }

    /// Iterates over `(path, value)` pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (MetricPath, &T)> {
        MetricPath::ALL.into_iter().map(move |path| (path, self.get(path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_unique_and_round_trip() {
        for path in MetricPath::ALL {
            assert_eq!(path.as_str().parse::<MetricPath>().unwrap(), path);
        }
        let mut strings: Vec<_> = MetricPath::ALL.iter().map(|p| p.as_str()).collect();
        strings.sort_unstable();
        strings.dedup();
        assert_eq!(strings.len(), MetricPath::ALL.len());
    }

    #[test]
    fn test_unknown_path() {
        let err = "environmental.co2".parse::<MetricPath>().unwrap_err();
        assert!(err.to_string().contains("environmental.co2"));
    }

    #[test]
    fn test_category_matches_first_segment() {
        for path in MetricPath::ALL {
            assert_eq!(path.segments().next(), Some(path.category().as_str()));
        }
    }

    #[test]
    fn test_metric_name() {
        assert_eq!(MetricPath::Co2Emission.metric_name(), "CO2_emission");
        assert_eq!(
            MetricPath::BoardDiversityMinority.metric_name(),
            "minority_percentage"
        );
    }

    #[test]
    fn test_path_serde() {
        let json = serde_json::to_string(&MetricPath::EthicsViolations).unwrap();
        assert_eq!(json, "\"governance.ethics_violations\"");
        let parsed: MetricPath = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, MetricPath::EthicsViolations);
    }

    #[test]
    fn test_metric_set_get_matches_from_fn() {
        let set = MetricSet::from_fn(|path| path.as_str().len());
        for (path, value) in set.iter() {
            assert_eq!(*value, path.as_str().len());
        }
    }

    #[test]
    fn test_try_from_fn_stops_at_first_error() {
        let mut visited = Vec::new();
        let result: Result<MetricSet<()>, MetricPath> = MetricSet::try_from_fn(|path| {
            visited.push(path);
            if path == MetricPath::EmployeeSatisfaction {
                Err(path)
            } else {
                Ok(())
            }
        });
        assert_eq!(result.unwrap_err(), MetricPath::EmployeeSatisfaction);
        assert_eq!(visited.len(), 6);
    }

    #[test]
    fn test_metric_set_layout_follows_paths() {
        let set = MetricSet::from_fn(|path| path.as_str().to_string());
        let value = serde_json::to_value(&set).unwrap();

        for path in MetricPath::ALL {
            let leaf = path
                .segments()
                .fold(&value, |node, segment| &node[segment]);
            assert_eq!(leaf.as_str(), Some(path.as_str()));
        }
    }
}
