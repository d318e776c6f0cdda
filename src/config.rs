use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;

use crate::service::ServiceConfig;

/// Serve 2D slices of a NIfTI volume as grayscale PNG images
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Config {
    /// NIfTI volume (.nii or .nii.gz) served by /slice
    #[arg(long)]
    pub volume: PathBuf,

    /// Address to bind to
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,

    #[arg(long, default_value_t = 5000)]
    pub port: u16,

    /// Verbose error bodies and debug-level logging
    #[arg(long, default_value_t = false)]
    pub debug: bool,
}

impl Config {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Log level used when `RUST_LOG` is not set
    pub fn default_log_level(&self) -> &'static str {
        if self.debug { "debug" } else { "info" }
    }

    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            volume_path: self.volume.clone(),
            debug: self.debug,
        }
    }
}
