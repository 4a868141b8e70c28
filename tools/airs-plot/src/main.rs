//! Plot one layer of an AIRS Level-3 methane retrieval on a global map.
//!
//! Reads the granule from the directory named by `HDFEOS_ZOO_DIR` (falling
//! back to the current directory), renders layer 11 of `CH4_VMR_A` over
//! low-resolution coastlines and a labeled graticule, and writes
//! `<granule>.py.png` into the working directory.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use airs_plot::config::Config;
use airs_plot::pipeline;

/// The granule this tool plots.
const FILE_NAME: &str = "AIRS.2021.02.01.L3.RetStd_IR028.v7.0.4.0.G21066221513.hdf";
/// 3-D retrieval field to slice.
const DATAFIELD_NAME: &str = "CH4_VMR_A";
/// Index along the H20PrsLvls axis.
const LAYER_INDEX: usize = 11;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Quiet the HDF5 C library before any file is touched.
    hdfeos_grid::silence_hdf5_errors();

    let config = Config::from_env();
    info!(
        data_dir = %config.data_dir.display(),
        file = FILE_NAME,
        field = DATAFIELD_NAME,
        layer = LAYER_INDEX,
        "starting plot"
    );

    let output = pipeline::run(&config, FILE_NAME, DATAFIELD_NAME, LAYER_INDEX)?;
    info!(path = %output.display(), "done");
    Ok(())
}
