//! Check command implementation
//!
//! Reports the effective configuration and whether it is valid.

use tracing::info;

use crate::config::CliConfig;
use crate::Result;

/// Run the check command
pub fn run(config: &CliConfig) -> Result<()> {
    info!("Checking configuration...");
    print!("{}", report(config));
    config.validate()?;
    info!("Configuration OK");
    Ok(())
}

fn report(config: &CliConfig) -> String {
    let sampling = &config.sampling;
    let mut out = String::new();
    out.push_str(&format!("putdi {}\n", env!("CARGO_PKG_VERSION")));
    out.push_str(&format!("  log level:        {}\n", config.log_level));
    out.push_str(&format!("  output format:    {}\n", config.output_format));
    out.push_str(&format!("  default notional: {}\n", config.default_notional));
    out.push_str(&format!(
        "  sampling:         every {} days within {} days of the end, every {} within {}, every {} before\n",
        sampling.fine_period,
        sampling.fine_horizon,
        sampling.medium_period,
        sampling.medium_horizon,
        sampling.coarse_period,
    ));
    out
}
