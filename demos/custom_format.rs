// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! An example of configuring the template, the colors and the timestamp from the environment.

use clilog::Config;
use clilog::Level;
use clilog::color::Color;
use clilog::layout::TemplateLayout;

fn main() {
    let layout = TemplateLayout::new(
        r#"{{ time | timef("%H:%M:%S") | color(level) }} [{{ level }}] {{ message }}"#,
    )
    .unwrap()
    .info_color(Color::Blue);

    // CLILOG_LEVEL, CLILOG_FORMAT, CLILOG_TIMESTAMP_FORMAT and NO_COLOR take precedence
    let config = Config::from_env().unwrap_or_default();
    clilog::builder()
        .level(Level::Debug)
        .layout(layout)
        .config(config)
        .apply();

    clilog::debug!("Hello debug!");
    clilog::info!("Hello info!");
    clilog::warn!("Hello warn!");
    clilog::error!("Hello error!");

    clilog::set_format("{{ time }} {{ level | abbrev }} {{ message }}").unwrap();
    clilog::set_timestamp_format("%Y-%m-%dT%H:%M:%S%:z").unwrap();
    clilog::info!("Hello RFC 3339 timestamps!");

    if let Err(err) = clilog::set_format("{{ level | shout }}") {
        clilog::warn!("format left unchanged: {err}");
    }
}
