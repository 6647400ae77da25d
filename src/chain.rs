// SPDX-License-Identifier: AGPL-3.0-only

//! Fibonacci substitution sequence and the quasicrystal mass chain.
//!
//! The sequence starts from the seed segments `A`, `B` and grows by
//! concatenating the two most recent segments, B-segment first:
//!
//! ```text
//! A | B | BA | BAB | BABBA | BABBABAB | ...
//! ```
//!
//! The atom chain is every segment flattened in order, so the chain for
//! generation g holds F(g) A-sites and F(g+1) − 1 B-sites (g ≥ 2). The last
//! segment alone is the Fibonacci word, of length F(g).
//!
//! # Provenance
//! Kohmoto, Kadanoff & Tang (1983), Phys. Rev. Lett. 50, 1870
//! Lothaire (2002), *Algebraic Combinatorics on Words*, ch. 2

use serde::Serialize;
use std::fmt;

use crate::error::{PhononError, Result};

/// One of the two atom species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Token {
    /// Species carrying mass M_A
    A,
    /// Species carrying mass M_B
    B,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// Segments produced by the substitution rule, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FibonacciSequence {
    segments: Vec<Vec<Token>>,
}

impl FibonacciSequence {
    /// Run the substitution rule for `generations` generations.
    ///
    /// The seed pair is always present, so `generations <= 2` returns
    /// exactly `[A], [B]`. Each further generation appends
    /// `current_B ++ current_A` and rolls the pair forward.
    #[must_use]
    pub fn generate(generations: u32) -> Self {
        let mut current_a = vec![Token::A];
        let mut current_b = vec![Token::B];
        let mut segments = vec![current_a.clone(), current_b.clone()];

        for _ in 0..generations.saturating_sub(2) {
            let mut next = Vec::with_capacity(current_b.len() + current_a.len());
            next.extend_from_slice(&current_b);
            next.extend_from_slice(&current_a);
            segments.push(next.clone());
            current_a = current_b;
            current_b = next;
        }

        Self { segments }
    }

    /// All segments, oldest first.
    #[must_use]
    pub fn segments(&self) -> &[Vec<Token>] {
        &self.segments
    }

    /// Concatenate every segment token by token into one linear chain.
    #[must_use]
    pub fn flatten(&self) -> Vec<Token> {
        self.segments.iter().flatten().copied().collect()
    }

    /// The most recent segment: the Fibonacci word of this generation.
    #[must_use]
    pub fn word(&self) -> &[Token] {
        self.segments.last().map(Vec::as_slice).unwrap_or_default()
    }
}

/// Render a token slice as a compact string such as `"BABBA"`.
#[must_use]
pub fn token_string(tokens: &[Token]) -> String {
    tokens.iter().map(ToString::to_string).collect()
}

/// Map tokens to masses: A → `m_a`, B → `m_b`, order preserved.
#[must_use]
pub fn materialize(tokens: &[Token], m_a: f64, m_b: f64) -> Vec<f64> {
    tokens
        .iter()
        .map(|t| match t {
            Token::A => m_a,
            Token::B => m_b,
        })
        .collect()
}

/// Fibonacci number with F(0) = 0, F(1) = F(2) = 1.
///
/// `None` once F(n) no longer fits in a `u64` (n ≥ 94).
#[must_use]
pub fn fibonacci_number(n: u32) -> Option<u64> {
    if n == 0 {
        return Some(0);
    }
    let (mut a, mut b) = (0_u64, 1_u64);
    for _ in 1..n {
        let next = a.checked_add(b)?;
        a = b;
        b = next;
    }
    Some(b)
}

/// Largest generation count [`MassChain::fibonacci`] accepts.
///
/// g = 18 gives 6764 sites, a dense coupling matrix of about 370 MB and a
/// Schur solve of minutes; the matrix grows by φ² per generation.
pub const MAX_GENERATIONS: u32 = 18;

/// Ordered, immutable chain of strictly positive atom masses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MassChain {
    masses: Vec<f64>,
    tokens: Option<Vec<Token>>,
    generations: Option<u32>,
}

impl MassChain {
    /// Build the Fibonacci quasicrystal chain for `generations` generations.
    ///
    /// # Errors
    /// `InvalidGenerations` for 0, `TooManyGenerations` above
    /// [`MAX_GENERATIONS`], `NonPositiveMass` if either mass is not positive
    /// and finite.
    pub fn fibonacci(generations: u32, m_a: f64, m_b: f64) -> Result<Self> {
        if generations == 0 {
            return Err(PhononError::InvalidGenerations(generations));
        }
        if generations > MAX_GENERATIONS {
            return Err(PhononError::TooManyGenerations {
                requested: generations,
                max: MAX_GENERATIONS,
            });
        }
        check_mass(0, m_a)?;
        check_mass(1, m_b)?;

        let tokens = FibonacciSequence::generate(generations).flatten();
        let masses = materialize(&tokens, m_a, m_b);
        log::debug!(
            "fibonacci chain: generations={generations}, sites={}",
            masses.len()
        );
        Ok(Self {
            masses,
            tokens: Some(tokens),
            generations: Some(generations),
        })
    }

    /// Wrap an arbitrary mass sequence.
    ///
    /// # Errors
    /// `EmptyChain` or `NonPositiveMass` (first offending site).
    pub fn from_masses(masses: Vec<f64>) -> Result<Self> {
        if masses.is_empty() {
            return Err(PhononError::EmptyChain);
        }
        for (site, &m) in masses.iter().enumerate() {
            check_mass(site, m)?;
        }
        Ok(Self {
            masses,
            tokens: None,
            generations: None,
        })
    }

    /// Site masses in chain order.
    #[must_use]
    pub fn masses(&self) -> &[f64] {
        &self.masses
    }

    /// Species sequence, when the chain came from the substitution rule.
    #[must_use]
    pub fn tokens(&self) -> Option<&[Token]> {
        self.tokens.as_deref()
    }

    /// Generation count, when the chain came from the substitution rule.
    #[must_use]
    pub const fn generations(&self) -> Option<u32> {
        self.generations
    }

    /// Number of sites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.masses.len()
    }

    /// Always false for a constructed chain; provided for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }

    /// True when every site carries the same mass.
    #[must_use]
    #[allow(clippy::float_cmp)] // masses are copied verbatim from two inputs
    pub fn is_uniform(&self) -> bool {
        self.masses.windows(2).all(|w| w[0] == w[1])
    }
}

fn check_mass(site: usize, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PhononError::NonPositiveMass { site, value })
    }
}
