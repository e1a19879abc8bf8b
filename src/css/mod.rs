//! Style engine: value lexer, declaration parser, class registry, cascade.

pub mod cascade;
pub mod model;
pub mod parser;
pub mod properties;
pub mod registry;
pub mod tokenizer;
pub mod value;

pub use cascade::{cascade, EffectiveStyle, StyleCache};
pub use model::Declarations;
pub use parser::parse_style;
pub use properties::LayoutProperties;
pub use registry::{RegistryError, StyleClass, StyleRegistry};
pub use value::{Length, StyleValue};
