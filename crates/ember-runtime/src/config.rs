// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Runtime configuration loaded from an optional JSON file.

use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

/// Parameters of the worker/channel demonstration loop.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Number of producer workers to spawn.
    pub workers: u32,
    /// Jobs each producer pushes before finishing.
    pub jobs_per_worker: u32,
    /// Name of the channel the workers rendezvous on.
    pub channel: String,
    /// Milliseconds the control loop waits for each job before giving up.
    pub demand_timeout_ms: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            jobs_per_worker: 8,
            channel: "jobs".to_owned(),
            demand_timeout_ms: 2000,
        }
    }
}

impl RuntimeConfig {
    /// Loads the configuration from a JSON file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file '{}'", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing config file '{}'", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: RuntimeConfig = serde_json::from_str(r#"{ "workers": 2 }"#).unwrap();
        assert_eq!(config.workers, 2);
        assert_eq!(config.channel, "jobs");
        assert_eq!(config.jobs_per_worker, RuntimeConfig::default().jobs_per_worker);
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let err = RuntimeConfig::load(Path::new("/nonexistent/ember.json"))
            .expect_err("missing file must fail");
        assert!(err.to_string().contains("ember.json"));
    }
}
