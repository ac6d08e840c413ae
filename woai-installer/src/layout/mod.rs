//! Install root folder structure check.
//!
//! Before a merge, the install root must contain `Source/Extracted Packages`.
//! Two decision points are handed to the caller through [`LayoutPolicy`]:
//!
//! 1. The packages directory is missing: create it, or stop with
//!    [`LayoutError::CreationDeclined`].
//! 2. `Output` is not empty: continue and possibly overwrite, or stop with
//!    [`LayoutCheck::Aborted`].
//!
//! # Example
//!
//! ```no_run
//! use woai_installer::layout::{validate, FixedPolicy, LayoutCheck};
//! use woai_installer::paths::InstallPaths;
//!
//! let paths = InstallPaths::new("/sim/woai");
//! match validate(&paths, &FixedPolicy::assume_yes())? {
//!     LayoutCheck::Ready { .. } => println!("ready to merge"),
//!     LayoutCheck::Aborted(reason) => println!("aborted: {}", reason),
//! }
//! # Ok::<(), woai_installer::layout::LayoutError>(())
//! ```

mod error;
mod policy;
mod validator;

pub use error::{LayoutError, LayoutResult};
pub use policy::{FixedPolicy, LayoutPolicy};
pub use validator::{inspect, validate, AbortReason, LayoutCheck, LayoutReport};
