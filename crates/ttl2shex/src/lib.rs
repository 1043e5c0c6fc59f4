//! Derive ShEx shape schemas from sample Turtle resources and match them
//! against the shapes registered in a Solid pod.
//!
//! The pipeline runs Turtle text through a [`source`] triple stream into the
//! [`emitter::shex::ShapeSynthesizer`], parses ShEx compact syntax with
//! [`schema::parse_schema`], and decides structural equivalence with
//! [`compare::shapes_match`]. The [`matcher`] fans that comparison out over a
//! registry tree reached through the [`pod::SolidPod`] boundary.

pub mod compare;
pub mod config;
pub mod emitter;
pub mod error;
pub mod matcher;
pub mod model;
pub mod pod;
pub mod registry;
pub mod schema;
pub mod shapetree;
pub mod source;

pub use compare::{compare_schemas, shapes_match, ComparisonOutcome};
pub use emitter::shex::{turtle_to_shape, ShapeSynthesizer};
pub use error::{ConfigError, MatchError, PodError, SchemaParseError, SynthError, TurtleError};
pub use matcher::{match_shape_registries, MatchedShapeRegistry, ShapeCache, SkipFlag};
pub use schema::{parse_schema, ParsedShapeSchema, PropertyExpression, ShapeDecl, ValueType};
