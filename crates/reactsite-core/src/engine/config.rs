use super::rules::DEFAULT_POLARITY_THRESHOLD;
use crate::core::charges::gasteiger::DEFAULT_ITERATIONS;
pub use crate::core::geometry::embed::ConformerConfig;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for parameter '{parameter}': {reason}")]
    InvalidParameter {
        parameter: &'static str,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifierConfig {
    /// Charges strictly beyond +/- this value are strongly polarised.
    pub polarity_threshold: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            polarity_threshold: DEFAULT_POLARITY_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChargeConfig {
    pub iterations: usize,
    /// Optional `.toml` or `.csv` file overriding the built-in Gasteiger parameters.
    pub params_path: Option<PathBuf>,
}

impl Default for ChargeConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            params_path: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnalysisConfig {
    pub classifier: ClassifierConfig,
    pub charges: ChargeConfig,
    pub conformer: ConformerConfig,
    pub skip_descriptors: bool,
}

#[derive(Default)]
pub struct AnalysisConfigBuilder {
    polarity_threshold: Option<f64>,
    charge_iterations: Option<usize>,
    charge_params_path: Option<PathBuf>,
    conformer_seed: Option<u64>,
    conformer_max_iterations: Option<usize>,
    conformer_tolerance: Option<f64>,
    skip_descriptors: Option<bool>,
}

impl AnalysisConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn polarity_threshold(mut self, threshold: f64) -> Self {
        self.polarity_threshold = Some(threshold);
        self
    }
    pub fn charge_iterations(mut self, iterations: usize) -> Self {
        self.charge_iterations = Some(iterations);
        self
    }
    pub fn charge_params_path(mut self, path: PathBuf) -> Self {
        self.charge_params_path = Some(path);
        self
    }
    pub fn conformer_seed(mut self, seed: u64) -> Self {
        self.conformer_seed = Some(seed);
        self
    }
    pub fn conformer_max_iterations(mut self, iterations: usize) -> Self {
        self.conformer_max_iterations = Some(iterations);
        self
    }
    pub fn conformer_tolerance(mut self, tolerance: f64) -> Self {
        self.conformer_tolerance = Some(tolerance);
        self
    }
    pub fn skip_descriptors(mut self, skip: bool) -> Self {
        self.skip_descriptors = Some(skip);
        self
    }

    /// Fills unset values with defaults and validates the result.
    pub fn build(self) -> Result<AnalysisConfig, ConfigError> {
        let defaults = AnalysisConfig::default();

        let polarity_threshold = self
            .polarity_threshold
            .unwrap_or(defaults.classifier.polarity_threshold);
        if !polarity_threshold.is_finite() || polarity_threshold < 0.0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "polarity_threshold",
                reason: format!("must be a finite, non-negative number (got {polarity_threshold})"),
            });
        }

        let iterations = self.charge_iterations.unwrap_or(defaults.charges.iterations);
        if iterations == 0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "charge_iterations",
                reason: "at least one iteration is required".into(),
            });
        }

        let conformer = ConformerConfig {
            seed: self.conformer_seed.unwrap_or(defaults.conformer.seed),
            max_iterations: self
                .conformer_max_iterations
                .unwrap_or(defaults.conformer.max_iterations),
            tolerance: self
                .conformer_tolerance
                .unwrap_or(defaults.conformer.tolerance),
        };
        if conformer.max_iterations == 0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "conformer_max_iterations",
                reason: "at least one iteration is required".into(),
            });
        }
        if !conformer.tolerance.is_finite() || conformer.tolerance <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "conformer_tolerance",
                reason: format!("must be a finite, positive number (got {})", conformer.tolerance),
            });
        }

        Ok(AnalysisConfig {
            classifier: ClassifierConfig { polarity_threshold },
            charges: ChargeConfig {
                iterations,
                params_path: self.charge_params_path,
            },
            conformer,
            skip_descriptors: self.skip_descriptors.unwrap_or(defaults.skip_descriptors),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_builder_yields_defaults() {
        let config = AnalysisConfigBuilder::new().build().unwrap();
        assert_eq!(config, AnalysisConfig::default());
        assert_eq!(config.classifier.polarity_threshold, 0.15);
        assert_eq!(config.charges.iterations, 12);
        assert!(!config.skip_descriptors);
    }

    #[test]
    fn builder_sets_all_fields() {
        let config = AnalysisConfigBuilder::new()
            .polarity_threshold(0.2)
            .charge_iterations(6)
            .charge_params_path(PathBuf::from("params.toml"))
            .conformer_seed(7)
            .conformer_max_iterations(50)
            .conformer_tolerance(1e-3)
            .skip_descriptors(true)
            .build()
            .unwrap();
        assert_eq!(config.classifier.polarity_threshold, 0.2);
        assert_eq!(config.charges.iterations, 6);
        assert_eq!(config.charges.params_path, Some(PathBuf::from("params.toml")));
        assert_eq!(config.conformer.seed, 7);
        assert_eq!(config.conformer.max_iterations, 50);
        assert_eq!(config.conformer.tolerance, 1e-3);
        assert!(config.skip_descriptors);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let cases = [
            (AnalysisConfigBuilder::new().polarity_threshold(-0.1), "polarity_threshold"),
            (AnalysisConfigBuilder::new().polarity_threshold(f64::NAN), "polarity_threshold"),
            (AnalysisConfigBuilder::new().charge_iterations(0), "charge_iterations"),
            (
                AnalysisConfigBuilder::new().conformer_max_iterations(0),
                "conformer_max_iterations",
            ),
            (AnalysisConfigBuilder::new().conformer_tolerance(0.0), "conformer_tolerance"),
        ];
        for (builder, expected) in cases {
            match builder.build() {
                Err(ConfigError::InvalidParameter { parameter, .. }) => {
                    assert_eq!(parameter, expected)
                }
                other => panic!("expected error for {expected}, got {other:?}"),
            }
        }
    }
}
