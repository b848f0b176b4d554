use crate::domain::state::{ApplianceReading, ApplianceStatus, Energy};
use crate::domain::tuning::EnergyTuning;
use rand::Rng;

/// Drift every running appliance and recompute the energy total.
pub fn tick_energy<R: Rng + ?Sized>(energy: &mut Energy, rng: &mut R, cfg: EnergyTuning) {
    for reading in energy.appliances.iter_mut() {
        if reading.status == ApplianceStatus::On {
            jitter_power(reading, rng, cfg.max_jitter);
        }
    }
    recompute_total(energy);
}

/// Switch an appliance and assign the draw that goes with the new status.
pub fn switch_appliance<R: Rng + ?Sized>(
    reading: &mut ApplianceReading,
    status: ApplianceStatus,
    rng: &mut R,
    cfg: EnergyTuning,
) {
    reading.status = status;
    reading.power = match status {
        ApplianceStatus::On => rng.gen_range(cfg.min_on_power..cfg.max_on_power),
        ApplianceStatus::Off => 0,
    };
}

pub fn recompute_total(energy: &mut Energy) {
    energy.total = energy.appliances.total_power();
}

fn jitter_power<R: Rng + ?Sized>(reading: &mut ApplianceReading, rng: &mut R, max_jitter: i64) {
    let step = if max_jitter > 0 {
        rng.gen_range(-max_jitter..=max_jitter)
    } else {
        0
    };
    let next = (i64::from(reading.power) + step).clamp(0, i64::from(u32::MAX));
    reading.power = u32::try_from(next).unwrap_or(0);
}
