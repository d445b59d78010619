//! # Compartment Models
//!
//! Linear compartment-decay models and model-building tools for
//! [Twine](https://github.com/isentropic-dev/twine).
//!
//! A compartment model tracks quantities held in a fixed set of pools that
//! exchange material through first-order transfers. Its right-hand side is
//! evaluated as a pure function of state, ready to drive a numerical
//! integrator.
//!
//! ## Crate layout
//!
//! - [`models`]: Domain-specific [`twine_core::Model`] implementations.
//! - [`support`]: Supporting utilities used by models.
//!
//! ## Example
//!
//! ```
//! use compartment_models::models::ecology::compartment::{CompartmentModel, TransferGraph};
//!
//! let graph = TransferGraph::new(["humus", "dead", "living"])?
//!     .loss(0, 1.0)?
//!     .transfer(1, 0, 3.0)?
//!     .transfer(2, 1, 5.0)?;
//! let model = CompartmentModel::new(graph);
//!
//! let d = model.evaluate(0.0, &[0.0, 0.0, 809_601.0])?;
//! assert_eq!(d, vec![0.0, 4_048_005.0, -4_048_005.0]);
//! # Ok::<(), compartment_models::models::ecology::compartment::CompartmentError>(())
//! ```

pub mod models;
pub mod support;
