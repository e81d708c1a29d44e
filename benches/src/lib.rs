//! Shared harness for the `argon2` benchmarks.
//!
//! Throughput is reported in bytes of memory filled, measured in cycles on
//! targets that support `criterion-cycles-per-byte`.
use criterion::Criterion;

/// Criterion configured with the measurement used by every benchmark.
#[cfg(any(target_arch = "x86_64", target_arch = "x86", all(target_arch = "aarch64", target_os = "linux")))]
pub type Benchmarker = Criterion<criterion_cycles_per_byte::CyclesPerByte>;
/// Criterion configured with the measurement used by every benchmark.
#[cfg(not(any(target_arch = "x86_64", target_arch = "x86", all(target_arch = "aarch64", target_os = "linux"))))]
pub type Benchmarker = Criterion;

/// Declares a criterion group measured with [`Benchmarker`].
#[macro_export]
macro_rules! criterion_group_bench {
    ($Name:ident, $Target:ident) => {
        #[cfg(any(target_arch = "x86_64", target_arch = "x86", all(target_arch = "aarch64", target_os = "linux")))]
        criterion_group!(
            name = $Name;
            config = Criterion::default()
                .with_measurement(criterion_cycles_per_byte::CyclesPerByte)
                .sample_size(10);
            targets = $Target
        );
        #[cfg(not(any(target_arch = "x86_64", target_arch = "x86", all(target_arch = "aarch64", target_os = "linux"))))]
        criterion_group!(
            name = $Name;
            config = Criterion::default().sample_size(10);
            targets = $Target
        );
    };
}
