use crate::domain::state::Environment;
use crate::domain::tuning::ClimateTuning;
use rand::Rng;

/// Random-walk temperature and humidity, then clamp both to their bounds.
pub fn tick_climate<R: Rng + ?Sized>(env: &mut Environment, rng: &mut R, cfg: ClimateTuning) {
    env.temperature = (env.temperature + centered_step(rng, cfg.temperature_step))
        .clamp(cfg.min_temperature, cfg.max_temperature);
    env.humidity = (env.humidity + centered_step(rng, cfg.humidity_step))
        .clamp(cfg.min_humidity, cfg.max_humidity);
}

fn centered_step<R: Rng + ?Sized>(rng: &mut R, width: f64) -> f64 {
    if width <= 0.0 {
        return 0.0;
    }
    let half = width / 2.0;
    rng.gen_range(-half..half)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn readings_stay_within_bounds_over_long_runs() {
        let mut rng = Pcg64Mcg::seed_from_u64(2024);
        let mut env = Environment {
            temperature: 22.0,
            humidity: 45.0,
            air_quality: "good".to_string(),
        };

        for _ in 0..10_000 {
            let before = (env.temperature, env.humidity);
            tick_climate(&mut env, &mut rng, ClimateTuning::default());
            assert!((18.0..=28.0).contains(&env.temperature));
            assert!((30.0..=70.0).contains(&env.humidity));
            assert!((env.temperature - before.0).abs() <= 0.25);
            assert!((env.humidity - before.1).abs() <= 1.0);
        }
    }

    #[test]
    fn out_of_range_values_are_pulled_back_to_bounds() {
        let mut rng = Pcg64Mcg::seed_from_u64(5);
        let mut env = Environment {
            temperature: 40.0,
            humidity: 5.0,
            air_quality: "good".to_string(),
        };

        tick_climate(&mut env, &mut rng, ClimateTuning::default());

        assert_eq!(env.temperature, 28.0);
        assert_eq!(env.humidity, 30.0);
        assert_eq!(env.air_quality, "good");
    }
}
