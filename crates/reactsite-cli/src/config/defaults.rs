use reactsite::engine::config::AnalysisConfig;

/// Values used when neither the config file, `--set` nor a flag provides one.
pub struct DefaultsConfig {
    pub polarity_threshold: f64,
    pub charge_iterations: usize,
    pub conformer_seed: u64,
    pub conformer_max_iterations: usize,
    pub conformer_tolerance: f64,
    pub descriptors_enabled: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        let core = AnalysisConfig::default();
        Self {
            polarity_threshold: core.classifier.polarity_threshold,
            charge_iterations: core.charges.iterations,
            conformer_seed: core.conformer.seed,
            conformer_max_iterations: core.conformer.max_iterations,
            conformer_tolerance: core.conformer.tolerance,
            descriptors_enabled: !core.skip_descriptors,
        }
    }
}
