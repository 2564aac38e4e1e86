//! Bounded token pool gating concurrent directory listings.
//!
//! The pool is a generic counting resource: callers block in `acquire` until
//! a token is free and release it by dropping the returned guard. The walker
//! holds a token only for the duration of one directory listing, never across
//! recursion into children.

use tokio::sync::{Semaphore, SemaphorePermit};

/// A fixed-capacity pool of tokens with a blocking asynchronous acquire.
#[derive(Debug)]
pub struct TokenPool {
    permits: Semaphore,
    capacity: usize,
}

/// A held token. Dropping it returns the token to the pool.
#[derive(Debug)]
pub struct Token<'a> {
    _permit: SemaphorePermit<'a>,
}

impl TokenPool {
    /// Creates a pool with the given capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero; a zero-capacity pool could never grant
    /// a token and every acquirer would block forever.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 1, "token pool capacity must be at least 1");
        Self {
            permits: Semaphore::new(capacity),
            capacity,
        }
    }

    /// Acquires one token, waiting until one is available.
    pub async fn acquire(&self) -> Token<'_> {
        // The semaphore is never closed, so acquire can only fail if the
        // pool itself has been dropped, which the borrow forbids.
        let permit = self.permits.acquire().await.expect("token pool closed");
        Token { _permit: permit }
    }

    /// The total number of tokens in the pool.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The number of tokens currently free.
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }
}
