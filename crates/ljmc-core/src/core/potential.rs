use std::f64::consts::PI;

/// Reduced Lennard-Jones pair energy for a squared separation (sigma = epsilon = 1).
///
/// Callers are expected to gate on the squared cutoff; separations beyond it
/// contribute nothing and must not reach this function.
#[inline]
pub fn lennard_jones(r_squared: f64) -> f64 {
    let sig_by_r6 = (1.0 / r_squared).powi(3);
    let sig_by_r12 = sig_by_r6 * sig_by_r6;
    4.0 * (sig_by_r12 - sig_by_r6)
}

/// Analytic long-range correction for a cutoff-truncated Lennard-Jones fluid,
/// assuming uniform density beyond the cutoff.
pub fn tail_correction(particle_count: usize, box_length: f64, cutoff: f64) -> f64 {
    let volume = box_length.powi(3);
    let sig_by_cutoff3 = (1.0 / cutoff).powi(3);
    let sig_by_cutoff9 = sig_by_cutoff3.powi(3);
    let n = particle_count as f64;
    8.0 / 9.0 * PI * n * n / volume * (sig_by_cutoff9 - 3.0 * sig_by_cutoff3)
}
