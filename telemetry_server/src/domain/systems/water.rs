use crate::domain::state::Water;
use crate::domain::tuning::WaterTuning;
use rand::Rng;

/// Roll whether water flows this tick. Flow is per-tick; only the total accumulates.
pub fn tick_water<R: Rng + ?Sized>(water: &mut Water, rng: &mut R, cfg: WaterTuning) {
    let flowing = cfg.max_flow > 0 && rng.gen_bool(cfg.flow_chance.clamp(0.0, 1.0));
    water.flow = if flowing {
        rng.gen_range(0..cfg.max_flow)
    } else {
        0
    };
    water.total = water.total.saturating_add(u64::from(water.flow));
}
