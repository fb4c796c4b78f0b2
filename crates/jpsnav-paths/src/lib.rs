//! Grid navigation: jump point search plus path smoothing.
//!
//! This crate finds short paths across a 2D grid of walkable and blocked
//! cells, moving in all eight directions with octile costs:
//!
//! - **Jump Point Search** over an 8-connected grid ([`NavMap::find_path_by_grid`])
//! - **Line-of-sight smoothing** of cell paths ([`NavMap::smooth_path`])
//! - **Fractional queries** between continuous positions ([`NavMap::find_path`])
//! - **Connected Components** labelling for fast rejection ([`NavMap::mark_connected`])
//!
//! All queries go through [`NavMap`], which owns the obstacle bitmap and
//! reuses its search buffers across queries. The open set is a
//! [`FibHeap`], usable on its own as a general priority queue.
//!
//! # Costs
//!
//! | Step | Cost |
//! |---|---|
//! | Cardinal | [`CARDINAL_COST`] |
//! | Diagonal | [`DIAGONAL_COST`] |
//!
//! Diagonal steps may cut past a blocked corner as long as the target cell
//! itself is walkable.

mod cc;
mod config;
mod distance;
mod dump;
mod error;
mod fibheap;
mod jps;
mod navmap;
mod neighbors;
mod smooth;

pub use config::NavConfig;
pub use distance::{CARDINAL_COST, DIAGONAL_COST, octile};
pub use error::NavError;
pub use fibheap::{FibHeap, HeapError, NodeId};
pub use navmap::{NavMap, path_cost};
pub use neighbors::{DirSet, Direction};
