//! # Cart State
//!
//! The canonical slot holding the terminal's current cart.
//!
//! ## Update Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 read → compute → compare-and-swap                       │
//! │                                                                         │
//! │  snapshot() ───────► CartSnapshot { version: 7, cart }                 │
//! │                               │                                         │
//! │                               ▼                                         │
//! │                     cart.apply(action)   (pure, no lock held)          │
//! │                               │                                         │
//! │                               ▼                                         │
//! │  compare_and_swap(7, next)                                             │
//! │       ├── slot still at 7 ──► install next as version 8                │
//! │       └── slot moved on ────► StaleCart, recompute from new snapshot   │
//! │                                                                         │
//! │  The lock is held only for the pointer read or swap. A cart value is   │
//! │  never edited in place, so readers holding an Arc<Cart> can never see  │
//! │  a half-applied action.                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::convert::Infallible;
use std::sync::{Arc, Mutex, MutexGuard};

use thiserror::Error;
use tracing::warn;

use bistro_core::Cart;

/// A consistent view of the slot.
#[derive(Debug, Clone)]
pub struct CartSnapshot {
    /// Bumped on every successful swap.
    pub version: u64,
    pub cart: Arc<Cart>,
}

/// A swap lost the race against another update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Cart changed: expected version {expected}, found {current}")]
pub struct StaleCart {
    pub expected: u64,
    pub current: u64,
}

#[derive(Debug, Default)]
struct Slot {
    version: u64,
    cart: Arc<Cart>,
}

/// Shared cart slot.
#[derive(Debug, Default)]
pub struct CartState {
    slot: Mutex<Slot>,
}

impl CartState {
    /// Creates a slot holding an empty cart at version 0.
    pub fn new() -> Self {
        CartState::default()
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        // The slot only ever holds a fully built cart, so a poisoned lock
        // still guards a consistent value.
        self.slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Returns the current version and cart.
    pub fn snapshot(&self) -> CartSnapshot {
        let slot = self.lock();
        CartSnapshot {
            version: slot.version,
            cart: Arc::clone(&slot.cart),
        }
    }

    /// Installs `next` if the slot is still at `expected`.
    pub fn compare_and_swap(&self, expected: u64, next: Cart) -> Result<CartSnapshot, StaleCart> {
        let mut slot = self.lock();
        if slot.version != expected {
            return Err(StaleCart {
                expected,
                current: slot.version,
            });
        }

        slot.version += 1;
        slot.cart = Arc::new(next);
        Ok(CartSnapshot {
            version: slot.version,
            cart: Arc::clone(&slot.cart),
        })
    }

    /// Runs `f` against the current cart and installs its result, retrying
    /// from a fresh snapshot whenever another update got in first.
    ///
    /// An error from `f` leaves the slot untouched. A result equal to the
    /// current cart is not installed and does not bump the version.
    pub fn update<F, E>(&self, mut f: F) -> Result<Arc<Cart>, E>
    where
        F: FnMut(&Cart) -> Result<Cart, E>,
    {
        loop {
            let current = self.snapshot();
            let next = f(&current.cart)?;

            if next == *current.cart {
                return Ok(current.cart);
            }

            match self.compare_and_swap(current.version, next) {
                Ok(installed) => return Ok(installed.cart),
                Err(stale) => {
                    warn!(
                        expected = stale.expected,
                        current = stale.current,
                        "Cart update raced another action, retrying"
                    );
                }
            }
        }
    }

    /// [`update`](Self::update) for operations that cannot fail.
    pub fn modify<F>(&self, mut f: F) -> Arc<Cart>
    where
        F: FnMut(&Cart) -> Cart,
    {
        match self.update(|cart| Ok::<_, Infallible>(f(cart))) {
            Ok(cart) => cart,
            Err(never) => match never {},
        }
    }
}
