#![allow(non_snake_case)]

//! Computes the datasets behind a handful of introductory quantum-mechanics
//! visualizations:
//!
//! - Low-lying eigenstates of a particle in a box with a rectangular potential
//!   barrier, via a finite-difference Hamiltonian and an implicit-shift QL
//!   eigen-decomposition of the resulting symmetric tridiagonal matrix
//!   ([`solve`], [`tridiag`]).
//! - Randomly sampled electron clouds and orbital shells for one-electron
//!   atoms ([`cloud`]).
//! - The closed-form 2p_z probability density of a hydrogen-like atom
//!   ([`orbital`]).
//!
//! Rendering is left to external tools; everything here returns plain
//! [`ndarray`] arrays.
//!
//! See [`docs`] for theoretical background.

pub mod error;
pub mod config;
pub mod cloud;
pub mod orbital;
pub mod solve;
pub mod tridiag;
pub mod utils;

pub mod docs;

pub type Arr1<S> = ndarray::ArrayBase<S, ndarray::Ix1>;
