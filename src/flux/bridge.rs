use super::{FluxError, FluxPoint, FluxTable, NO_DATA_SENTINEL};
use crate::config::FluxConfig;
use crate::track::GeodeticPoint;

use super::ModelId;

/// cm^-2 to m^-2 for the native per-area flux scale.
const CM2_TO_M2: f64 = 1.0e4;

/// Differential flux for the two sampled species, m^-2*sec^-1*MeV^-1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluxSample {
    pub electron: f64,
    pub proton: f64,
}

/// Sample both species along the track. Output is index-aligned with the
/// track; chunking against the native row capacity is invisible here.
pub fn sample_flux(
    table: &dyn FluxTable,
    track: &[GeodeticPoint],
    config: &FluxConfig,
) -> Result<Vec<FluxSample>, FluxError> {
    let electron = sample_species(table, track, config.electron_energy_mev, config.electron_model)?;
    let proton = sample_species(table, track, config.proton_energy_mev, config.proton_model)?;
    Ok(electron
        .into_iter()
        .zip(proton)
        .map(|(electron, proton)| FluxSample { electron, proton })
        .collect())
}

/// One species pass: chunked native calls, sentinel cleanup, unit scaling.
pub fn sample_species(
    table: &dyn FluxTable,
    track: &[GeodeticPoint],
    energy_mev: f64,
    model: ModelId,
) -> Result<Vec<f64>, FluxError> {
    let mut out = Vec::with_capacity(track.len());
    for chunk in track.chunks(table.max_rows()) {
        let points: Vec<FluxPoint> = chunk.iter().map(FluxPoint::from_geodetic).collect();
        let raw = table.compute(&points, energy_mev, model)?;
        out.extend(raw.into_iter().map(normalize));
    }
    Ok(out)
}

/// The only place the native sentinel is ever inspected.
fn normalize(raw_cm2: f64) -> f64 {
    if raw_cm2 <= NO_DATA_SENTINEL {
        0.0
    } else {
        raw_cm2 * CM2_TO_M2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ELECTRON_ENERGY_MEV, PROTON_ENERGY_MEV};
    use crate::track::EpochSample;
    use chrono::{Duration, TimeZone, Utc};
    use std::cell::RefCell;

    struct MockTable {
        max: usize,
        calls: RefCell<Vec<usize>>,
    }

    impl MockTable {
        fn new(max: usize) -> Self {
            Self {
                max,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl FluxTable for MockTable {
        fn max_rows(&self) -> usize {
            self.max
        }

        fn compute(
            &self,
            points: &[FluxPoint],
            energy_mev: f64,
            model: ModelId,
        ) -> Result<Vec<f64>, FluxError> {
            self.calls.borrow_mut().push(points.len());
            // Deterministic per-point value independent of chunk position
            Ok(points
                .iter()
                .map(|p| p.latitude_deg * 3.0 + p.seconds_of_day / 86_400.0 + energy_mev
                    + f64::from(model.selector()))
                .collect())
        }
    }

    fn track_of(len: usize) -> Vec<GeodeticPoint> {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        (0..len)
            .map(|i| GeodeticPoint {
                epoch: EpochSample::new(start + Duration::seconds(10 * i as i64)),
                latitude_deg: (i as f64 * 7.0) % 80.0 - 40.0,
                longitude_deg: (i as f64 * 11.0) % 360.0 - 180.0,
                altitude_km: 400.0 + i as f64,
            })
            .collect()
    }

    #[test]
    fn chunking_is_invisible() {
        let capacity = 5;
        let track = track_of(2 * capacity + 3);

        let chunked = MockTable::new(capacity);
        let whole = sample_species(&chunked, &track, 0.650, ModelId::Ae8Min).unwrap();
        assert_eq!(whole.len(), track.len());
        assert_eq!(*chunked.calls.borrow(), vec![5, 5, 3]);

        // Identical to three separate calls of lengths N, N, 3 concatenated
        let manual = MockTable::new(capacity);
        let mut stitched = Vec::new();
        for part in [&track[..5], &track[5..10], &track[10..]] {
            stitched.extend(sample_species(&manual, part, 0.650, ModelId::Ae8Min).unwrap());
        }
        assert_eq!(whole, stitched);
    }

    #[test]
    fn exact_capacity_is_one_call() {
        let table = MockTable::new(8);
        let track = track_of(8);
        let out = sample_species(&table, &track, 1.5, ModelId::Ap8Min).unwrap();
        assert_eq!(out.len(), 8);
        assert_eq!(*table.calls.borrow(), vec![8]);
    }

    #[test]
    fn empty_track_never_calls_native() {
        let table = MockTable::new(4);
        let out = sample_species(&table, &[], 1.5, ModelId::Ap8Min).unwrap();
        assert!(out.is_empty());
        assert!(table.calls.borrow().is_empty());
    }

    struct SentinelTable;

    impl FluxTable for SentinelTable {
        fn max_rows(&self) -> usize {
            16
        }

        fn compute(
            &self,
            points: &[FluxPoint],
            _energy_mev: f64,
            _model: ModelId,
        ) -> Result<Vec<f64>, FluxError> {
            Ok((0..points.len())
                .map(|i| match i {
                    0 => -1.0e31,
                    1 => NO_DATA_SENTINEL,
                    2 => 0.0,
                    _ => 123.456,
                })
                .collect())
        }
    }

    #[test]
    fn sentinel_values_become_zero_others_scale() {
        let track = track_of(4);
        let out = sample_species(&SentinelTable, &track, 0.650, ModelId::Ae8Min).unwrap();
        assert_eq!(out[0], 0.0);
        assert_eq!(out[1], 0.0);
        assert_eq!(out[2], 0.0);
        assert!((out[3] - 123.456 * 1.0e4).abs() < 1e-9);
    }

    #[test]
    fn sample_flux_pairs_species() {
        let table = MockTable::new(6);
        let track = track_of(7);
        let config = FluxConfig {
            library_path: None,
            electron_model: ModelId::Ae8Min,
            proton_model: ModelId::Ap8Min,
            electron_energy_mev: ELECTRON_ENERGY_MEV,
            proton_energy_mev: PROTON_ENERGY_MEV,
        };
        let samples = sample_flux(&table, &track, &config).unwrap();
        assert_eq!(samples.len(), 7);

        let electron =
            sample_species(&MockTable::new(6), &track, ELECTRON_ENERGY_MEV, ModelId::Ae8Min)
                .unwrap();
        let proton =
            sample_species(&MockTable::new(6), &track, PROTON_ENERGY_MEV, ModelId::Ap8Min)
                .unwrap();
        for (i, sample) in samples.iter().enumerate() {
            assert_eq!(sample.electron, electron[i]);
            assert_eq!(sample.proton, proton[i]);
        }
    }
}
