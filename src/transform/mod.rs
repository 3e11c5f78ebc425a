//! Pure closed-form frame transforms.
//!
//! Nothing here consults the boundary; these functions are side-effect free
//! and safe to call from any thread.

pub mod bd09;
pub mod gcj02;
