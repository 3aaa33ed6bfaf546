use std::ffi::{c_double, c_int};
use std::path::Path;

use libloading::Library;

use super::{FluxError, FluxPoint, FluxTable, ModelId};

/// Width of the native energy axis: the energy matrix is 2 x NENE_MAX and the
/// flux output is capacity x NENE_MAX, whatever `nene` is actually set to.
pub const NENE_MAX: usize = 25;

// Geodetic alt/lat/lon input rows
const SYSAXES_GDZ: c_int = 0;
// Differential flux at the requested energies
const WHATF_DIFFERENTIAL: c_int = 1;

/// Writes the library's compiled NTIME_MAX through the pointer.
type GetNtimeMaxFn = unsafe extern "C" fn(*mut c_int);

/// Fortran convention: every scalar by reference, arrays at capacity length,
/// flux output column-major capacity x NENE_MAX.
type FlyInNasaAeapFn = unsafe extern "C" fn(
    *const c_int,    // ntime
    *const c_int,    // sysaxes
    *const c_int,    // whichm
    *const c_int,    // whatf
    *const c_int,    // nene
    *const c_double, // energy, 2 x NENE_MAX
    *const c_int,    // iyear
    *const c_int,    // idoy
    *const c_double, // ut seconds of day
    *const c_double, // x1: altitude km
    *const c_double, // x2: latitude deg
    *const c_double, // x3: longitude deg in [0, 360)
    *mut c_double,   // flux, capacity x NENE_MAX
);

#[cfg(target_os = "linux")]
const LIBRARY_NAMES: &[&str] = &["libirbem.so", "IRBEM/libirbem.so"];

#[cfg(target_os = "macos")]
const LIBRARY_NAMES: &[&str] = &["libirbem.dylib", "IRBEM/libirbem.dylib"];

#[cfg(target_os = "windows")]
const LIBRARY_NAMES: &[&str] = &[
    "libirbem.dll",
    "IRBEM\\libirbem.dll",
    "IRBEM\\bin\\libirbem.win64.gfortran64.dll",
];

/// The dynamically loaded IRBEM flux library, with its entry points resolved
/// once at load time and its row capacity already queried.
pub struct IrbemLibrary {
    // Function pointers below stay valid only while this handle is alive.
    _library: Library,
    fly_in_nasa_aeap: FlyInNasaAeapFn,
    ntime_max: usize,
}

impl IrbemLibrary {
    /// Open the native library from an explicit path, else the fixed
    /// per-platform candidate list.
    pub fn load(override_path: Option<&Path>) -> Result<Self, FluxError> {
        let library = match override_path {
            Some(path) => unsafe { Library::new(path) }?,
            None => {
                let mut found = None;
                for name in LIBRARY_NAMES {
                    if let Ok(library) = unsafe { Library::new(name) } {
                        log::info!("loaded flux model library: {}", name);
                        found = Some(library);
                        break;
                    }
                }
                found.ok_or(FluxError::LibraryNotFound)?
            }
        };
        Self::from_library(library)
    }

    fn from_library(library: Library) -> Result<Self, FluxError> {
        let get_ntime_max: GetNtimeMaxFn =
            resolve(&library, &["get_irbem_ntime_max1_", "get_irbem_ntime_max_"])?;
        let fly_in_nasa_aeap: FlyInNasaAeapFn =
            resolve(&library, &["fly_in_nasa_aeap1_", "fly_in_nasa_aeap_"])?;

        let mut ntime_max: c_int = -1;
        unsafe { get_ntime_max(&mut ntime_max) };
        if ntime_max <= 0 {
            return Err(FluxError::InvalidCapacity(ntime_max));
        }

        Ok(Self {
            _library: library,
            fly_in_nasa_aeap,
            ntime_max: ntime_max as usize,
        })
    }
}

/// Resolve one entry point through an ordered list of exported spellings.
fn resolve<T: Copy>(library: &Library, names: &[&'static str]) -> Result<T, FluxError> {
    for name in names {
        if let Ok(symbol) = unsafe { library.get::<T>(name.as_bytes()) } {
            return Ok(*symbol);
        }
    }
    Err(FluxError::MissingSymbol(names[0]))
}

impl FluxTable for IrbemLibrary {
    fn max_rows(&self) -> usize {
        self.ntime_max
    }

    fn compute(
        &self,
        points: &[FluxPoint],
        energy_mev: f64,
        model: ModelId,
    ) -> Result<Vec<f64>, FluxError> {
        if points.is_empty() {
            return Ok(Vec::new());
        }
        if points.len() > self.ntime_max {
            return Err(FluxError::TooManyRows {
                given: points.len(),
                max: self.ntime_max,
            });
        }

        // Fresh buffers every call so no row leaks between chunks. Arrays are
        // capacity-sized regardless of how many rows are filled.
        let mut iyear: Vec<c_int> = vec![0; self.ntime_max];
        let mut idoy: Vec<c_int> = vec![0; self.ntime_max];
        let mut ut: Vec<c_double> = vec![0.0; self.ntime_max];
        let mut altitude: Vec<c_double> = vec![0.0; self.ntime_max];
        let mut latitude: Vec<c_double> = vec![0.0; self.ntime_max];
        let mut longitude: Vec<c_double> = vec![0.0; self.ntime_max];
        for (i, point) in points.iter().enumerate() {
            iyear[i] = point.year;
            idoy[i] = point.day_of_year;
            ut[i] = point.seconds_of_day;
            altitude[i] = point.altitude_km;
            latitude[i] = point.latitude_deg;
            longitude[i] = point.longitude_deg;
        }

        // Single fixed energy: first row set, second row NaN.
        let mut energy = [0.0; 2 * NENE_MAX];
        energy[0] = energy_mev;
        energy[1] = f64::NAN;

        let mut flux: Vec<c_double> = vec![0.0; self.ntime_max * NENE_MAX];

        let ntime: c_int = points.len() as c_int;
        let sysaxes = SYSAXES_GDZ;
        let whichm: c_int = model.selector();
        let whatf = WHATF_DIFFERENTIAL;
        let nene: c_int = 1;

        unsafe {
            (self.fly_in_nasa_aeap)(
                &ntime,
                &sysaxes,
                &whichm,
                &whatf,
                &nene,
                energy.as_ptr(),
                iyear.as_ptr(),
                idoy.as_ptr(),
                ut.as_ptr(),
                altitude.as_ptr(),
                latitude.as_ptr(),
                longitude.as_ptr(),
                flux.as_mut_ptr(),
            );
        }

        // Column-major output: the first energy's column is the first
        // capacity-length run.
        Ok(flux[..points.len()].to_vec())
    }
}
