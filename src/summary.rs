//! Combined projection output and the records handed to collaborators

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::assumptions::{Assumptions, EconomicAssumptions, PayoutHorizon};
use crate::profile::{Gender, Profile};
use crate::projection::{PostReformResult, PreReformResult, TargetPension};

/// Both regime results for one profile plus derived figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionBundle {
    pub profile: Profile,
    pub pre_reform: PreReformResult,
    pub post_reform: PostReformResult,
    pub target: TargetPension,

    /// Life expectancy for the profile's gender
    pub life_expectancy: f64,

    /// Time between retirement and life expectancy
    pub payout_horizon: PayoutHorizon,

    /// Economic assumptions the projection ran with
    pub economic: EconomicAssumptions,
}

impl ProjectionBundle {
    pub fn assemble(
        profile: Profile,
        pre_reform: PreReformResult,
        post_reform: PostReformResult,
        assumptions: &Assumptions,
    ) -> Self {
        let econ = assumptions.economic;

        let target = TargetPension::project(
            profile.ideal_pension,
            profile.retirement_age - profile.current_age,
            econ.inflation_rate,
            post_reform.total_pension(),
        );

        Self {
            life_expectancy: assumptions.life.life_expectancy(profile.gender),
            payout_horizon: assumptions.life.payout_horizon(profile.gender, profile.retirement_age),
            profile,
            pre_reform,
            post_reform,
            target,
            economic: econ,
        }
    }

    /// Monthly gain of the post-reform total pension over the pre-reform pension
    pub fn pension_improvement(&self) -> f64 {
        self.post_reform.total_pension() - self.pre_reform.total_pension()
    }

    /// Post-reform total pension as a fraction of the current salary
    pub fn replacement_rate(&self) -> Option<f64> {
        if self.profile.monthly_salary > 0.0 {
            Some(self.post_reform.total_pension() / self.profile.monthly_salary)
        } else {
            None
        }
    }

    /// Flatten into one output row
    pub fn summary_row(&self, profile_id: &str) -> SummaryRow {
        SummaryRow {
            profile_id: profile_id.to_string(),
            gender: self.profile.gender,
            current_age: self.profile.current_age,
            retirement_age: self.profile.retirement_age,
            reform_month_index: self.post_reform.reform_month_index,
            pre_final_balance: self.pre_reform.final_balance,
            pre_pension: self.pre_reform.total_pension(),
            pre_minimum_applied: self.pre_reform.minimum_pension_applied,
            post_final_balance: self.post_reform.final_balance,
            post_base_pension: self.post_reform.base_pension,
            post_additional_pension: self.post_reform.additional_pension,
            post_reserve_bonus: self.post_reform.reserve_bonus,
            post_total_pension: self.post_reform.total_pension(),
            post_minimum_applied: self.post_reform.minimum_pension_applied,
            improvement: self.pension_improvement(),
            target_future_value: self.target.future_value,
            monthly_gap: self.target.monthly_gap,
        }
    }
}

/// One line of a batch summary file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub profile_id: String,
    pub gender: Gender,
    pub current_age: f64,
    pub retirement_age: f64,
    pub reform_month_index: u32,
    pub pre_final_balance: f64,
    pub pre_pension: f64,
    pub pre_minimum_applied: bool,
    pub post_final_balance: f64,
    pub post_base_pension: f64,
    pub post_additional_pension: f64,
    pub post_reserve_bonus: f64,
    pub post_total_pension: f64,
    pub post_minimum_applied: bool,
    pub improvement: f64,
    pub target_future_value: f64,
    pub monthly_gap: f64,
}

/// Who asked for the projection
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CallerMetadata {
    pub name: String,
    pub education_level: String,
    pub session_id: String,
}

/// A projection as persisted by a result store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PensionRecord {
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
    pub metadata: CallerMetadata,
    pub bundle: ProjectionBundle,
}

impl PensionRecord {
    /// Stamp a bundle with the current time
    pub fn new(metadata: CallerMetadata, bundle: ProjectionBundle) -> Self {
        Self::with_timestamp(metadata, bundle, Utc::now())
    }

    pub fn with_timestamp(metadata: CallerMetadata, bundle: ProjectionBundle, timestamp: DateTime<Utc>) -> Self {
        Self {
            session_id: metadata.session_id.clone(),
            timestamp,
            metadata,
            bundle,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::projection::{FixedClock, ProjectionConfig, ProjectionEngine};
    use approx::assert_relative_eq;
    use chrono::TimeZone;
    use std::sync::Arc;

    pub(crate) fn sample_bundle() -> ProjectionBundle {
        let assumptions = Assumptions::default_reform();
        let clock = FixedClock::at_month_index(assumptions.plan.reform_start, 0);
        let engine = ProjectionEngine::new(assumptions, ProjectionConfig::default()).with_clock(Arc::new(clock));

        let profile = Profile::from_years_months(41, 6, 65.0, 28_998_190.0, 2_564_066.0, Gender::Female)
            .with_ideal_pension(1_500_000.0);
        engine.project(&profile).unwrap()
    }

    pub(crate) fn sample_record(session_id: &str) -> PensionRecord {
        let metadata = CallerMetadata {
            name: "Ana".to_string(),
            education_level: "universitaria".to_string(),
            session_id: session_id.to_string(),
        };
        PensionRecord::new(metadata, sample_bundle())
    }

    #[test]
    fn test_bundle_derived_figures() {
        let bundle = sample_bundle();

        assert_eq!(bundle.life_expectancy, 90.8);
        assert_eq!(bundle.payout_horizon, PayoutHorizon { years: 25, months: 9 });
        assert_eq!(bundle.economic, EconomicAssumptions::default());

        let total = 794_658.5586296004 + 153_408.9881524325 + 86_025.0705610619;
        assert_relative_eq!(bundle.post_reform.total_pension(), total, max_relative = 1e-9);
        assert_relative_eq!(bundle.pension_improvement(), total - 639_923.5540620716, max_relative = 1e-9);
        assert_relative_eq!(bundle.replacement_rate().unwrap(), total / 2_564_066.0, max_relative = 1e-9);

        assert_relative_eq!(bundle.target.years, 23.5, max_relative = 1e-12);
        assert_relative_eq!(bundle.target.future_value, 1.5 * 2_002_971.5495752592, max_relative = 1e-9);
        assert_relative_eq!(bundle.target.monthly_gap, bundle.target.future_value - total, max_relative = 1e-9);
    }

    #[test]
    fn test_replacement_rate_without_salary() {
        let mut bundle = sample_bundle();
        bundle.profile.monthly_salary = 0.0;
        assert_eq!(bundle.replacement_rate(), None);
    }

    #[test]
    fn test_summary_row() {
        let bundle = sample_bundle();
        let row = bundle.summary_row("P0001");

        assert_eq!(row.profile_id, "P0001");
        assert_eq!(row.gender, Gender::Female);
        assert_eq!(row.reform_month_index, 0);
        assert_eq!(row.post_total_pension, bundle.post_reform.total_pension());
        assert_eq!(row.monthly_gap, bundle.target.monthly_gap);
    }

    #[test]
    fn test_record_serializes() {
        let timestamp = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let record = PensionRecord::with_timestamp(
            CallerMetadata {
                session_id: "s-1".to_string(),
                ..CallerMetadata::default()
            },
            sample_bundle(),
            timestamp,
        );

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"session_id\":\"s-1\""));
        assert!(json.contains("2025-06-01T12:00:00Z"));
        assert!(!json.contains("cashflows"));

        let parsed: PensionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.timestamp, timestamp);
        assert_eq!(parsed.bundle.profile.gender, Gender::Female);
    }
}
