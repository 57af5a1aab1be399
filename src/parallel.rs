//! Rayon thread pool configuration
//!
//! The averaging and masking kernels run on rayon's global pool. It can be
//! sized once per process, before the first parallel operation.

use crate::errors::{Result, VolProcError};
use rayon::ThreadPoolBuilder;

/// Configuration for parallel processing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParallelConfig {
    /// `None` keeps rayon's default (one thread per logical core)
    pub num_threads: Option<usize>,
}

impl ParallelConfig {
    /// Create a configuration, `None` keeping rayon's default
    pub fn new(num_threads: Option<usize>) -> Self {
        Self { num_threads }
    }

    /// Use exactly `num_threads` threads
    pub fn with_threads(num_threads: usize) -> Self {
        Self {
            num_threads: Some(num_threads),
        }
    }

    /// One thread per CPU core
    pub fn all_cores() -> Self {
        Self::with_threads(num_cpus::get())
    }

    /// Builds the global rayon pool.
    ///
    /// # Errors
    ///
    /// Returns [`VolProcError::ThreadPoolError`] if the thread count is zero or
    /// the global pool was already initialized.
    pub fn setup_global_pool(&self) -> Result<()> {
        let Some(num_threads) = self.num_threads else {
            println!("✅ Using default thread pool configuration");
            return Ok(());
        };

        if num_threads == 0 {
            return Err(VolProcError::ThreadPoolError(
                "thread count must be at least 1".to_string(),
            ));
        }

        ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .map_err(|e| {
                VolProcError::ThreadPoolError(format!(
                    "Failed to initialize thread pool with {num_threads} threads: {e}"
                ))
            })?;

        println!("✅ Configured parallel processing with {num_threads} threads");
        Ok(())
    }

    /// Threads in the pool parallel operations currently run on
    pub fn current_threads(&self) -> usize {
        rayon::current_num_threads()
    }
}

/// Information about the parallel processing environment
#[derive(Debug, Clone)]
pub struct ParallelInfo {
    pub current_threads: usize,
    pub available_cores: usize,
    pub available_parallelism: usize,
}

/// Snapshot of the current pool and the machine's cores
pub fn get_parallel_info() -> ParallelInfo {
    ParallelInfo {
        current_threads: rayon::current_num_threads(),
        available_cores: num_cpus::get(),
        available_parallelism: std::thread::available_parallelism()
            .map(|p| p.get())
            .unwrap_or(1),
    }
}

impl ParallelInfo {
    /// Print the information to stdout
    pub fn print_info(&self) {
        println!("📊 Parallel Processing Information:");
        println!("   Current threads: {}", self.current_threads);
        println!("   Available CPU cores: {}", self.available_cores);
        println!("   Available parallelism: {}", self.available_parallelism);
    }
}
