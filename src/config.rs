//! Processing configuration.
//!
//! Provides the per-dataset-kind profiles that drive the single parsing
//! pipeline, the vocabulary organization priority and the decoding switches.

use crate::constants::sections;
use crate::error::{IosError, Result};
use crate::models::DatasetKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Steps run after the header and data block are decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostStep {
    /// Derive per-record timestamps and check them against the start time
    RecordTimes,
    /// Classify channels and assign canonical codes
    ResolveIdentities,
    /// Decorate variables from the vocabulary table, when one is supplied
    ApplyVocabulary,
}

/// Sections and steps for one dataset kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetProfile {
    /// Sections whose absence fails the file
    pub required_sections: Vec<String>,

    /// Sections copied into the global attributes when present
    pub optional_sections: Vec<String>,

    /// Post-processing steps, in order
    pub post_steps: Vec<PostStep>,
}

impl DatasetProfile {
    fn new(optional: &[&str], post_steps: &[PostStep]) -> Self {
        Self {
            required_sections: vec![sections::FILE.to_string()],
            optional_sections: optional.iter().map(|s| s.to_string()).collect(),
            post_steps: post_steps.to_vec(),
        }
    }

    pub fn runs(&self, step: PostStep) -> bool {
        self.post_steps.contains(&step)
    }
}

/// Global configuration for IOS file processing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// Vocabulary organizations in priority order
    pub organizations: Vec<String>,

    /// Drop undecodable bytes instead of failing the file
    pub lossy_decoding: bool,

    /// Fail when the first record time is too far from the start time
    pub check_start_time: bool,

    /// Dataset-specific profiles
    pub profiles: BTreeMap<DatasetKind, DatasetProfile>,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        use PostStep::{ApplyVocabulary, RecordTimes, ResolveIdentities};

        let profile_sections = [
            sections::ADMINISTRATION,
            sections::LOCATION,
            sections::INSTRUMENT,
            sections::COMMENTS,
            sections::REMARKS,
            sections::HISTORY,
        ];
        let mooring_sections = [
            sections::ADMINISTRATION,
            sections::LOCATION,
            sections::INSTRUMENT,
            sections::DEPLOYMENT,
            sections::RECOVERY,
            sections::COMMENTS,
            sections::REMARKS,
            sections::HISTORY,
        ];

        let mut profiles = BTreeMap::new();

        // Profiles carry a single start time, moorings a time series
        profiles.insert(
            DatasetKind::Ctd,
            DatasetProfile::new(&profile_sections, &[ResolveIdentities, ApplyVocabulary]),
        );
        profiles.insert(
            DatasetKind::Bottle,
            DatasetProfile::new(&profile_sections, &[ResolveIdentities, ApplyVocabulary]),
        );
        profiles.insert(
            DatasetKind::CurrentMeter,
            DatasetProfile::new(
                &mooring_sections,
                &[RecordTimes, ResolveIdentities, ApplyVocabulary],
            ),
        );
        profiles.insert(
            DatasetKind::MooredCtd,
            DatasetProfile::new(
                &mooring_sections,
                &[RecordTimes, ResolveIdentities, ApplyVocabulary],
            ),
        );

        Self {
            organizations: vec!["ios".to_string(), "cf".to_string()],
            lossy_decoding: true,
            check_start_time: true,
            profiles,
        }
    }
}

impl ProcessorConfig {
    /// Create configuration with a custom organization priority
    pub fn with_organizations<I, S>(mut self, organizations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.organizations = organizations.into_iter().map(Into::into).collect();
        self
    }

    /// Fail files containing bytes that are not valid UTF-8
    pub fn with_strict_decoding(mut self) -> Self {
        self.lossy_decoding = false;
        self
    }

    /// Skip the first-record start time check
    pub fn without_start_time_check(mut self) -> Self {
        self.check_start_time = false;
        self
    }

    /// Replace the profile of one dataset kind
    pub fn with_profile(mut self, kind: DatasetKind, profile: DatasetProfile) -> Self {
        self.profiles.insert(kind, profile);
        self
    }

    /// Get the profile for a dataset kind
    pub fn profile(&self, kind: DatasetKind) -> Result<&DatasetProfile> {
        self.profiles.get(&kind).ok_or_else(|| IosError::Configuration {
            message: format!("No profile configured for dataset kind '{}'", kind.label()),
        })
    }

    /// Check the configuration before any file is processed
    pub fn validate(&self) -> Result<()> {
        if self.organizations.iter().any(|o| o.trim().is_empty()) {
            return Err(IosError::Configuration {
                message: "Vocabulary organization names must not be empty".to_string(),
            });
        }

        for (kind, profile) in &self.profiles {
            if profile.required_sections.is_empty() {
                return Err(IosError::Configuration {
                    message: format!(
                        "Profile '{}' must require at least the {} section",
                        kind.label(),
                        sections::FILE
                    ),
                });
            }
            if profile.runs(PostStep::ApplyVocabulary) && !profile.runs(PostStep::ResolveIdentities) {
                return Err(IosError::Configuration {
                    message: format!(
                        "Profile '{}' applies the vocabulary without resolving identities",
                        kind.label()
                    ),
                });
            }
        }

        debug!(
            "Configuration valid: {} profiles, organizations {:?}",
            self.profiles.len(),
            self.organizations
        );
        Ok(())
    }
}
