//! Content-based hashing for run IDs.

use pm_design::{CircuitSolveConfig, MotorDesignParameters};
use sha2::{Digest, Sha256};

pub fn compute_run_id(
    parameters: &MotorDesignParameters,
    config: &CircuitSolveConfig,
    engine_version: &str,
) -> String {
    let mut hasher = Sha256::new();

    let parameters_json = serde_json::to_string(parameters).unwrap_or_default();
    hasher.update(parameters_json.as_bytes());

    let config_json = serde_json::to_string(config).unwrap_or_default();
    hasher.update(config_json.as_bytes());

    hasher.update(engine_version.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pm_design::NonConvergencePolicy;

    #[test]
    fn hash_stability() {
        let params = MotorDesignParameters::default();
        let config = CircuitSolveConfig::default();

        let hash1 = compute_run_id(&params, &config, "v1");
        let hash2 = compute_run_id(&params, &config, "v1");

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn hash_differs_for_different_inputs() {
        let params = MotorDesignParameters::default();
        let mut other = params.clone();
        other.core.airgap_mm = 0.6;
        let config = CircuitSolveConfig::default();

        assert_ne!(
            compute_run_id(&params, &config, "v1"),
            compute_run_id(&other, &config, "v1")
        );
        assert_ne!(
            compute_run_id(&params, &config, "v1"),
            compute_run_id(&params, &config, "v2")
        );

        let strict = CircuitSolveConfig {
            policy: NonConvergencePolicy::Reject,
            ..CircuitSolveConfig::default()
        };
        assert_ne!(
            compute_run_id(&params, &config, "v1"),
            compute_run_id(&params, &strict, "v1")
        );
    }
}
