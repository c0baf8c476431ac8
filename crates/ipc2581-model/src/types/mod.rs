pub mod bom;
pub mod dictionary;
pub mod layer;
pub mod metadata;
pub mod package;
pub mod primitives;
pub mod transform;

pub use bom::*;
pub use dictionary::*;
pub use layer::*;
pub use metadata::*;
pub use package::*;
pub use primitives::*;
pub use transform::*;
