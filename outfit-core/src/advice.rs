//! Pure decision rules: perceived temperature, outfit bands, tips and
//! weather-code labels. Nothing here performs I/O.

pub mod condition;
pub mod feels_like;
pub mod outfit;
pub mod tips;

pub use condition::condition_label;
pub use feels_like::feels_like;
pub use outfit::{OutfitBand, pick_outfit};
pub use tips::{TipInputs, tips};

/// Round half-up, so `-2.5` becomes `-2` rather than `-3`.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
