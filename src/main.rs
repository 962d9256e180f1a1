/*
 *  main.rs
 *
 *  obc-dash - on-board computer display
 *  (c) 2020-26 Stuart Hunter
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use chrono::Local;
use clap::Parser;
use env_logger::Env;
use log::{info, warn};

use obc_dash::config::{self, Cli};
use obc_dash::dashboard::Dashboard;
use obc_dash::display;
use obc_dash::display::layout::LOGO_SIZE;
use obc_dash::oil::OilStore;
use obc_dash::sensors::FakeSensors;
use obc_dash::svgimage::Logo;

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let loaded = config::load_from(&cli)?;
    let cfg = loaded.config;

    if cli.dump_config {
        print!("{}", config::dump(&cfg)?);
        return Ok(());
    }

    env_logger::Builder::from_env(Env::default().default_filter_or(cfg.log_level()))
        .format_timestamp_secs()
        .init();

    info!("{} on-board computer", env!("CARGO_PKG_NAME"));
    info!("v.{} built {}", env!("CARGO_PKG_VERSION"), BUILD_DATE);
    if let Some(skipped) = loaded.skipped {
        warn!("Ignoring config {}: {}", skipped.path.display(), skipped.error);
    }

    let (oil, _) = OilStore::open(cfg.state_file(), Local::now().timestamp());
    let logo = Logo::load_or_emblem(cfg.logo(), LOGO_SIZE);

    let dashboard = Dashboard::new(
        cfg.settings(),
        oil,
        Box::new(FakeSensors::new(cfg.sensor_jitter())),
        Box::new(cfg.weather()),
        logo,
        cfg.title(),
    );

    display::run(dashboard, &cfg.display())?;
    info!("Shutting down");
    Ok(())
}
