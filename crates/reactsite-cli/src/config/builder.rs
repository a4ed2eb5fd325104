use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use crate::cli::AnalysisSettingsArgs;
use crate::error::{CliError, Result};
use crate::utils::parser::{self, ParseError};
use reactsite::engine::config::{AnalysisConfig, AnalysisConfigBuilder};
use std::path::PathBuf;
use tracing::debug;

/// Resolves the analysis configuration: defaults < config file < `--set` < dedicated flags.
pub fn build_config(args: &AnalysisSettingsArgs) -> Result<AnalysisConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };
    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let classifier = file_config.classifier.take().unwrap_or_default();
    let charges = file_config.charges.take().unwrap_or_default();
    let conformer = file_config.conformer.take().unwrap_or_default();
    let descriptors = file_config.descriptors.take().unwrap_or_default();

    let polarity_threshold = args
        .polarity_threshold
        .or(classifier.polarity_threshold)
        .unwrap_or(defaults.polarity_threshold);
    let charge_iterations = args
        .charge_iterations
        .or(charges.iterations)
        .unwrap_or(defaults.charge_iterations);
    let params_path = args.charge_params.clone().or(charges.params_path);
    let seed = args
        .seed
        .or(conformer.seed)
        .unwrap_or(defaults.conformer_seed);
    let descriptors_enabled = if args.skip_descriptors {
        false
    } else {
        descriptors.enabled.unwrap_or(defaults.descriptors_enabled)
    };

    let mut builder = AnalysisConfigBuilder::new()
        .polarity_threshold(polarity_threshold)
        .charge_iterations(charge_iterations)
        .conformer_seed(seed)
        .conformer_max_iterations(
            conformer
                .max_iterations
                .unwrap_or(defaults.conformer_max_iterations),
        )
        .conformer_tolerance(conformer.tolerance.unwrap_or(defaults.conformer_tolerance))
        .skip_descriptors(!descriptors_enabled);
    if let Some(path) = params_path {
        builder = builder.charge_params_path(path);
    }

    let config = builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;
    debug!("Resolved analysis configuration: {:?}", config);
    Ok(config)
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for pair in set_values {
        let (key, value) = parser::parse_key_value(pair).map_err(config_error)?;

        match key {
            "classifier.polarity-threshold" => {
                config
                    .classifier
                    .get_or_insert_with(Default::default)
                    .polarity_threshold =
                    Some(parser::parse_value(key, value, "float").map_err(config_error)?);
            }
            "charges.iterations" => {
                config.charges.get_or_insert_with(Default::default).iterations =
                    Some(parser::parse_value(key, value, "integer").map_err(config_error)?);
            }
            "charges.params-path" => {
                config.charges.get_or_insert_with(Default::default).params_path =
                    Some(PathBuf::from(value));
            }
            "conformer.seed" => {
                config.conformer.get_or_insert_with(Default::default).seed =
                    Some(parser::parse_value(key, value, "integer").map_err(config_error)?);
            }
            "conformer.max-iterations" => {
                config
                    .conformer
                    .get_or_insert_with(Default::default)
                    .max_iterations =
                    Some(parser::parse_value(key, value, "integer").map_err(config_error)?);
            }
            "conformer.tolerance" => {
                config.conformer.get_or_insert_with(Default::default).tolerance =
                    Some(parser::parse_value(key, value, "float").map_err(config_error)?);
            }
            "descriptors.enabled" => {
                config.descriptors.get_or_insert_with(Default::default).enabled =
                    Some(parser::parse_value(key, value, "boolean").map_err(config_error)?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unknown configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

fn config_error(e: ParseError) -> CliError {
    CliError::Config(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn defaults_apply_without_file_or_overrides() {
        let config = build_config(&AnalysisSettingsArgs::default()).expect("build ok");
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn build_config_reads_file() {
        let dir = tempdir().unwrap();
        let cfg_path = dir.path().join("config.toml");
        let toml = r#"
            [classifier]
            polarity-threshold = 0.2

            [charges]
            iterations = 8

            [conformer]
            seed = 42
            max-iterations = 500
            tolerance = 0.001

            [descriptors]
            enabled = false
            "#;
        fs::write(&cfg_path, toml).unwrap();

        let args = AnalysisSettingsArgs {
            config: Some(cfg_path),
            ..Default::default()
        };
        let config = build_config(&args).expect("build ok");

        assert_eq!(config.classifier.polarity_threshold, 0.2);
        assert_eq!(config.charges.iterations, 8);
        assert_eq!(config.conformer.seed, 42);
        assert_eq!(config.conformer.max_iterations, 500);
        assert_eq!(config.conformer.tolerance, 0.001);
        assert!(config.skip_descriptors);
    }

    #[test]
    fn set_values_override_file_and_flags_override_set_values() {
        let dir = tempdir().unwrap();
        let cfg_path = dir.path().join("config.toml");
        fs::write(
            &cfg_path,
            "[classifier]\npolarity-threshold = 0.3\n[conformer]\nseed = 1\n",
        )
        .unwrap();

        let args = AnalysisSettingsArgs {
            config: Some(cfg_path),
            seed: Some(99),
            set_values: vec![
                "classifier.polarity-threshold=0.05".to_string(),
                "conformer.seed=5".to_string(),
                "charges.iterations=20".to_string(),
            ],
            ..Default::default()
        };
        let config = build_config(&args).expect("build ok");

        assert!((config.classifier.polarity_threshold - 0.05).abs() < 1e-12);
        assert_eq!(config.conformer.seed, 99);
        assert_eq!(config.charges.iterations, 20);
    }

    #[test]
    fn skip_descriptors_flag_wins_over_file() {
        let args = AnalysisSettingsArgs {
            skip_descriptors: true,
            set_values: vec!["descriptors.enabled=true".to_string()],
            ..Default::default()
        };
        assert!(build_config(&args).unwrap().skip_descriptors);
    }

    #[test]
    fn params_path_flag_is_forwarded() {
        let args = AnalysisSettingsArgs {
            charge_params: Some(PathBuf::from("custom.csv")),
            ..Default::default()
        };
        assert_eq!(
            build_config(&args).unwrap().charges.params_path,
            Some(PathBuf::from("custom.csv"))
        );
    }

    #[test]
    fn unknown_and_malformed_set_values_are_config_errors() {
        for bad in ["classifier.unknown=1", "charges.iterations=lots", "missing"] {
            let args = AnalysisSettingsArgs {
                set_values: vec![bad.to_string()],
                ..Default::default()
            };
            assert!(
                matches!(build_config(&args), Err(CliError::Config(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn invalid_values_are_rejected_by_core_validation() {
        let args = AnalysisSettingsArgs {
            polarity_threshold: Some(-1.0),
            ..Default::default()
        };
        let err = build_config(&args).unwrap_err();
        assert!(err.to_string().contains("polarity_threshold"));
    }
}
