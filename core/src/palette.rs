//! Fixed colours shared by effects and renderers.

use crate::Rgb;

/// Rare nodes, their debris and rare payout labels.
pub const GOLD: Rgb = Rgb::from_rgb(0xff, 0xd7, 0x00);
/// Common nodes and their debris.
pub const LIGHT_GRAY: Rgb = Rgb::from_rgb(0xd3, 0xd3, 0xd3);
/// Engine exhaust.
pub const BOOSTER_ORANGE: Rgb = Rgb::from_rgb(0xff, 0x45, 0x00);
/// Common payout labels.
pub const WHITE: Rgb = Rgb::from_rgb(0xff, 0xff, 0xff);
/// Spaceship hull.
pub const SHIP_PINK: Rgb = Rgb::from_rgb(0xff, 0x00, 0x77);
