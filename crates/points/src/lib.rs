//! # SSR Points
//!
//! Turns a located hierarchy subtree into an ordered list of report points.
//!
//! ```text
//! subtree root
//!     │
//!     ├──> PointResolver
//!     │    ├─> skip `{location}_{name}` self references
//!     │    ├─> keep input-point names only (classify)
//!     │    └─> prefix = alias of the unique parent
//!     │
//!     └──> Collator (en_US)  →  ordered `prefix:local_name` keys
//! ```

mod classify;
mod collation;
mod error;
mod point;
mod resolver;

pub use classify::{
    classify, is_input_point, naming_code, PointClass, CODE_LEN, INPUT_CODES, NON_INPUT_CODES,
    STRUCTURED_INPUT_CODES,
};
pub use collation::Collator;
pub use error::{PointsError, ResolutionWarning, Result};
pub use point::Point;
pub use resolver::{is_self_reference, PointResolver, Resolution};
