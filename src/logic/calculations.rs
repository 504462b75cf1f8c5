use crate::models::{CropParameters, GddDay, WeatherRecord};

/// Calculate one day's Growing Degree Days using the capped-averaging method.
///
/// The maximum is capped at `t_upper`, the minimum is raised to `t_base`
/// (and never exceeds `t_upper`), and the result is floored at zero.
/// The caller guarantees `tmin <= tmax`; the value is not validated here.
pub fn compute_daily_gdd(tmin: f64, tmax: f64, t_base: f64, t_upper: f64) -> f64 {
    let adjusted_max = tmax.min(t_upper);
    let adjusted_min = tmin.max(t_base).min(t_upper);

    let gdd = (adjusted_max + adjusted_min) / 2.0 - t_base;
    if gdd > 0.0 {
        gdd
    } else {
        0.0
    }
}

/// Derive the per-day and running GDD columns for a weather series.
/// Day numbering starts at 1 for the first row.
pub fn accumulate_gdd(records: &[WeatherRecord], params: &CropParameters) -> Vec<GddDay> {
    let mut cumulative = 0.0;

    records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let daily_gdd = compute_daily_gdd(r.tmin, r.tmax, params.t_base(), params.t_upper());
            cumulative += daily_gdd;
            GddDay {
                day: i as u32 + 1,
                date: r.date,
                tmin: r.tmin,
                tmax: r.tmax,
                daily_gdd,
                cumulative_gdd: cumulative,
            }
        })
        .collect()
}

/// Reference curve of a season spent entirely at or above `t_upper`:
/// day `i` maps to `(t_upper - t_base) * i`.
pub fn ideal_gdd_curve(params: &CropParameters, days: u32) -> Vec<f64> {
    let per_day = params.max_daily_gdd();
    (1..=days).map(|day| per_day * day as f64).collect()
}
