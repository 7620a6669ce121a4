//! Strain-based difficulty rating for a single osu! skill axis.
//!
//! A sequence of timed objects is fed through a pluggable [`Evaluator`] which
//! assigns each object a raw difficulty. Those values accumulate into a
//! decaying strain whose peak per fixed-length time section is collected and
//! then aggregated into a rating. On the side, the same values are tracked
//! statistically to produce a consistency score.
//!
//! ## Usage
//!
//! ```
//! use rosu_strain::{EvalFlags, Rating, SkillConfig, TimedObject};
//!
//! # fn main() -> Result<(), rosu_strain::RatingError> {
//! let rating = Rating::new(SkillConfig::aim(true));
//!
//! // Objects are given by their start time and an arbitrary payload
//! let objects = rating.objects([(0.0, 0.8), (250.0, 1.2), (500.0, 1.0)])?;
//!
//! // Evaluators are usually full-blown skill models but closures work too
//! let evaluator = |curr: &TimedObject<f64>, _: &[TimedObject<f64>], _: EvalFlags| curr.base;
//!
//! let attrs = rating.calculate(&objects, &evaluator)?;
//!
//! assert!(attrs.rating > 0.0);
//! assert!((0.0..=1.0).contains(&attrs.consistency));
//! # Ok(()) }
//! ```
//!
//! ## Gradual calculation
//!
//! [`GradualRating`] yields the attributes after each processed object which
//! is handy to display the rating progression throughout a map.
//!
//! ## Features
//!
//! | Flag | Description
//! | - | -
//! | `default` | No features enabled
//! | `tracing` | Emits [`tracing`](https://docs.rs/tracing) events during calculation and enables `rosu-map`'s tracing

#![deny(rustdoc::broken_intra_doc_links, rustdoc::missing_crate_level_docs)]

#[macro_use]
mod util;

pub use self::{
    attributes::SkillAttributes,
    error::{InvalidInput, OverflowStage, RatingError},
    gradual::GradualRating,
    model::{
        config::{
            ConsistencyNormalization, ConsistencyReference, EvalFlags, RatingCurve, SkillConfig,
            TopSectionReduction,
        },
        object::{TimedObject, TimedObjects},
    },
    rating::{Rating, Strains},
    skill::{
        consistency::{ConsistencyAccumulator, ConsistencyStats},
        evaluator::Evaluator,
        section::SectionPeaks,
        strain::{strain_decay, StrainAccumulator},
        Skill,
    },
};

/// Re-exported mods of `rosu-mods` used to derive a clock rate.
pub use rosu_mods::GameModsLegacy;

mod attributes;
mod error;
mod gradual;
pub mod model;
mod rating;
pub mod skill;
