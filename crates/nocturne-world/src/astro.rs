// Copyright 2025 eraflo
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

//! Celestial lighting parameters pushed by the server.

use nocturne_render::math::Rgba;
use serde::{Deserialize, Serialize};

/// The astronomy update as it arrives on the wire.
///
/// The first five fields are always present; the rest were added to the
/// protocol later and older servers omit them, so they decode as `None` and
/// take fixed defaults. All fractional fields are cyclic positions in
/// `[0, 1)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AstronomyPayload {
    /// Time-of-day fraction.
    pub day_time: f64,
    /// Moon phase fraction.
    pub moon_phase: f64,
    /// Time-of-year fraction.
    pub year_time: f64,
    /// Whether it is currently night.
    pub night: bool,
    /// The current moon tint.
    pub moon_color: Rgba,
    /// Whether it is the bright half of the year.
    #[serde(default)]
    pub is_summer: Option<bool>,
    /// Sun intensity scale.
    #[serde(default)]
    pub sun_power: Option<f64>,
    /// Atmospheric scattering density.
    #[serde(default)]
    pub sky_density: Option<f64>,
    /// Long-cycle year fraction.
    #[serde(default)]
    pub years: Option<f64>,
    /// Moon position within the year.
    #[serde(default)]
    pub year_moon: Option<f64>,
    /// Moon distance fraction.
    #[serde(default)]
    pub moon_dist: Option<f64>,
}

/// The resolved astronomy state consumed by sky and lighting code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Astronomy {
    /// Time-of-day fraction.
    pub day_time: f64,
    /// Moon phase fraction.
    pub moon_phase: f64,
    /// Time-of-year fraction.
    pub year_time: f64,
    /// Whether it is currently night.
    pub night: bool,
    /// The current moon tint.
    pub moon_color: Rgba,
    /// Whether it is the bright half of the year.
    pub is_summer: bool,
    /// Sun intensity scale.
    pub sun_power: f64,
    /// Atmospheric scattering density.
    pub sky_density: f64,
    /// Long-cycle year fraction.
    pub years: f64,
    /// Moon position within the year.
    pub year_moon: f64,
    /// Moon distance fraction.
    pub moon_dist: f64,
}

impl Astronomy {
    /// Resolves a wire payload, substituting the protocol defaults for
    /// fields the server omitted.
    #[must_use]
    pub fn from_payload(p: AstronomyPayload) -> Self {
        Self {
            day_time: p.day_time,
            moon_phase: p.moon_phase,
            year_time: p.year_time,
            night: p.night,
            moon_color: p.moon_color,
            is_summer: p.is_summer.unwrap_or(true),
            sun_power: p.sun_power.unwrap_or(0.5),
            sky_density: p.sky_density.unwrap_or(0.5),
            years: p.years.unwrap_or(0.5),
            year_moon: p.year_moon.unwrap_or(0.5),
            moon_dist: p.moon_dist.unwrap_or(0.5),
        }
    }
}

impl From<AstronomyPayload> for Astronomy {
    fn from(p: AstronomyPayload) -> Self {
        Self::from_payload(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn short_payload() -> AstronomyPayload {
        AstronomyPayload {
            day_time: 0.25,
            moon_phase: 0.5,
            year_time: 0.75,
            night: false,
            moon_color: Rgba::rgb(200, 210, 255),
            is_summer: None,
            sun_power: None,
            sky_density: None,
            years: None,
            year_moon: None,
            moon_dist: None,
        }
    }

    #[test]
    fn test_omitted_fields_take_protocol_defaults() {
        let ast = Astronomy::from_payload(short_payload());
        assert!(ast.is_summer);
        assert_relative_eq!(ast.sun_power, 0.5);
        assert_relative_eq!(ast.sky_density, 0.5);
        assert_relative_eq!(ast.years, 0.5);
        assert_relative_eq!(ast.year_moon, 0.5);
        assert_relative_eq!(ast.moon_dist, 0.5);
    }

    #[test]
    fn test_present_fields_pass_through() {
        let payload = AstronomyPayload {
            is_summer: Some(false),
            sun_power: Some(0.9),
            ..short_payload()
        };
        let ast = Astronomy::from_payload(payload);
        assert!(!ast.is_summer);
        assert_relative_eq!(ast.sun_power, 0.9);
        assert_relative_eq!(ast.day_time, 0.25);
    }

    #[test]
    fn test_short_wire_form_decodes_with_defaults() {
        let json = r#"{
            "day_time": 0.1,
            "moon_phase": 0.2,
            "year_time": 0.3,
            "night": true,
            "moon_color": { "r": 255, "g": 255, "b": 255, "a": 255 }
        }"#;
        let payload: AstronomyPayload = serde_json::from_str(json).unwrap();
        let ast = Astronomy::from_payload(payload);
        assert!(ast.night);
        assert_relative_eq!(ast.sky_density, 0.5);
    }
}
