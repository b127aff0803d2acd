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

//! Ember runtime root.
//!
//! Owns the [`ModuleRegistry`], performs single-threaded module
//! registration, then drives a producer/consumer loop over a named channel
//! to exercise the thread subsystem end to end.

mod config;

use crate::config::RuntimeConfig;
use anyhow::Context;
use ember_core::{ModuleRegistry, ThreadEvent, ThreadModule, Variant};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => RuntimeConfig::load(&path)?,
        None => RuntimeConfig::default(),
    };
    log::info!(
        "Ember runtime starting: {} worker(s) x {} job(s) on channel '{}'",
        config.workers,
        config.jobs_per_worker,
        config.channel
    );

    // Registration happens here, on the main thread, before any worker
    // exists; lookups afterward are shared and read-only.
    let thread_module = Arc::new(ThreadModule::new());
    let mut modules = ModuleRegistry::new();
    modules
        .register(Arc::clone(&thread_module) as Arc<dyn ember_core::Module>)
        .context("registering the thread module")?;

    run(&config, &thread_module)?;

    log::info!("Ember runtime shut down cleanly");
    Ok(())
}

fn run(config: &RuntimeConfig, threads: &ThreadModule) -> anyhow::Result<()> {
    let results = threads.channel(&config.channel);

    let mut workers = Vec::new();
    for worker_index in 0..config.workers {
        let jobs = threads.channel(&config.channel);
        let jobs_per_worker = config.jobs_per_worker;
        let mut worker = threads
            .new_thread(format!("producer-{worker_index}"), move || {
                for job in 0..jobs_per_worker {
                    let id = worker_index * jobs_per_worker + job;
                    jobs.push(Variant::from(f64::from(id)));
                }
            })
            .with_context(|| format!("creating producer {worker_index}"))?;
        worker.start()
            .with_context(|| format!("starting producer {worker_index}"))?;
        workers.push(worker);
    }

    let expected = u64::from(config.workers) * u64::from(config.jobs_per_worker);
    let timeout = Duration::from_millis(config.demand_timeout_ms);
    let mut collected = 0u64;
    while collected < expected {
        match results.demand(Some(timeout)) {
            Some(value) => {
                log::debug!("collected job {value}");
                collected += 1;
            }
            None => {
                log::warn!(
                    "demand timed out after {collected}/{expected} jobs; giving up"
                );
                break;
            }
        }
    }

    for worker in &mut workers {
        if let Err(error) = worker.wait() {
            log::error!("{error}");
        }
    }

    for event in threads.events().drain() {
        match event {
            ThreadEvent::Started { name } => log::debug!("worker '{name}' started"),
            ThreadEvent::Finished { name } => log::debug!("worker '{name}' finished"),
            ThreadEvent::Panicked { name, message } => {
                log::error!("worker '{name}' panicked: {message}");
            }
        }
    }

    log::info!("collected {collected}/{expected} jobs, {} left queued", results.count());
    Ok(())
}
