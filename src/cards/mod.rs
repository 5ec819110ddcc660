//! Card system: definitions, instances, and registry.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card definitions
//! - `CardColor`: Colour class that drives combat placement rules
//! - `CardDefinition`: Static card data (value, abilities)
//! - `CardInstance`: One physical copy with its own `EntityId`
//! - `CardRegistry`: Definition lookup and instantiation

pub mod definition;
pub mod instance;
pub mod registry;

pub use definition::{CardColor, CardDefinition, CardId};
pub use instance::CardInstance;
pub use registry::CardRegistry;
