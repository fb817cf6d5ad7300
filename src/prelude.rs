//! Convenient re-exports for common usage.
//!
//! ```
//! use lww_element_dict::prelude::*;
//! ```

pub use crate::events::{DictOp, OpCrdt};
pub use crate::tie_break::{GreaterWins, LesserWins, OrderBy, TieBreak};
pub use crate::AddRecord;
pub use crate::Crdt;
pub use crate::DeltaCrdt;
pub use crate::DictDelta;
pub use crate::LWWDict;
