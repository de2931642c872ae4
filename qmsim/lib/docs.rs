//! Theoretical background.
//!
//! # Contents
//! - [Finite differences](#finite-differences)
//! - [QL iteration](#ql-iteration)
//! - [Electron clouds](#electron-clouds)
//! - [The 2p_z orbital](#the-2p_z-orbital)
//!
//! # Finite differences
//! The one-dimensional, time-independent Schrödinger equation (TISE) for a
//! particle of mass *m* in a potential *V*(*x*) reads
//! ```text
//!    ħ² ∂²
//! - --- --- ψ(x) + V(x) ψ(x) = E ψ(x)
//!   2 m ∂x²
//! ```
//! Confining the particle to a box `[0, L]` (ψ = 0 outside) and sampling on a
//! grid
//! ```text
//! x[i] = i a, i ∊ {0, ..., N - 1}
//! ψ[i] = ψ(x[i])
//! V[i] = V(x[i])
//! ```
//! the second derivative is replaced by the three-point difference
//! ```text
//! ∂²ψ     ψ[i + 1] - 2 ψ[i] + ψ[i - 1]
//! --- ≈  ----------------------------- + O(a²)
//! ∂x²                 a²
//! ```
//! and the TISE becomes a matrix eigenvalue problem *H* ψ = *E* ψ with a real,
//! symmetric, tridiagonal *H*. This crate builds *H* as
//! ```text
//! H[i, i]     = 2 ħ² / (m a²) + V[i]
//! H[i, i ± 1] =  -ħ² / (m a²)
//! ```
//! with *a* = *L* / *N*. Note that the kinetic coefficient here is *ħ*²/*m*
//! rather than *ħ*²/2 *m*: the matrix describes a particle of mass *m*/2 in
//! the usual convention. For a free box the eigenvalues are known exactly,
//! ```text
//!        2 ħ²          k π
//! E_k = ------ (1 - cos -----),  k ∊ {1, ..., N}
//!       m a²           N + 1
//! ```
//! which tend to *k*² *π*² *ħ*² / *m* *L*² as *N* → ∞.
//!
//! Eigenvectors come out with unit Euclidean norm over the grid points. To
//! compare with a continuum wavefunction normalized as ∫|ψ|² d*x* = 1, divide
//! by √*a* (or use [`wf_normalized`][crate::utils::wf_normalized]).
//!
//! # QL iteration
//! All eigenpairs of a symmetric tridiagonal matrix are found with the QL
//! algorithm with implicit shifts[^1]. Each sweep applies a sequence of Givens
//! rotations that is equivalent to factoring *H* - σ*I* = *Q* *L* and forming
//! *L* *Q* + σ*I*, which preserves both the spectrum and the tridiagonal form
//! while driving the off-diagonal element `e[l]` to zero. The shift σ is the
//! eigenvalue of the leading 2×2 block closest to `d[l]`, which gives
//! (typically cubic) convergence; in practice one to two sweeps per eigenvalue
//! suffice. Once an off-diagonal element is negligible,
//! ```text
//! |e[m]| ≤ ε (|d[m]| + |d[m + 1]|)
//! ```
//! the matrix splits and the iteration moves on. Accumulating the rotations
//! onto the identity yields the eigenvectors at *O*(*N*³) cost; computing
//! eigenvalues alone costs *O*(*N*²).
//!
//! # Electron clouds
//! The electron of a one-electron atom has no trajectory, only a probability
//! distribution. A quick picture of it is a cloud of points whose radii follow
//! an exponential distribution, mimicking the exp(-*Z* *r*) tail of the 1s
//! orbital (the mean of the 1s radial distribution is 3/2 *Z* Bohr radii),
//! with directions drawn at random:
//! ```text
//! r ~ Exp(mean = s)
//! θ ~ U[0, 2π)
//! φ ~ U[0, π)
//!
//! x = r sin φ cos θ
//! y = r sin φ sin θ
//! z = r cos φ
//! ```
//! A sparser cloud can be drawn by rejection: propose uniform radii in
//! `[0, r_max)` and keep each with probability exp(-*r*²/2 *σ*²).
//!
//! # The 2p_z orbital
//! Hydrogen-like wavefunctions separate as *ψ*(*r*, *θ*, *φ*) = *R*(*r*)
//! *Y*(*θ*, *φ*). For the 2p_z orbital (*n* = 2, *l* = 1, *m* = 0),
//! ```text
//!            1        -Z r/2
//! R(r) = ------- r e
//!        4 √6
//!
//!          cos θ
//! Y(θ) = -------
//!         √(4π)
//! ```
//! in units of the Bohr radius. The density |*R* *Y*|² vanishes at the nucleus
//! and on the plane θ = π/2, and peaks on the *z* axis at *r* = 2/*Z*.
//!
//! [^1]: W. H. Press, S. A. Teukolsky, W. T. Vetterling, and B. P. Flannery,
//! *Numerical Recipes*, 3rd ed., §11.4 (Cambridge University Press, 2007).
