// Copyright 2025 Irreducible Inc.
//! Reusable big integer buffers for hint calls.
//!
//! Hint inputs and outputs are arbitrary precision integers. A solve calls hints in a tight loop,
//! so the integers (and their heap limbs) are recycled through a shared pool instead of being
//! allocated per call.

use std::{
	mem,
	ops::{Deref, DerefMut},
	sync::Mutex,
};

use num_bigint::BigUint;
use num_traits::Zero;

/// A bounded free list of big integers, shared between threads.
#[derive(Debug)]
pub struct ScratchPool {
	free: Mutex<Vec<BigUint>>,
	capacity: usize,
}

impl ScratchPool {
	/// Number of integers kept around by [`ScratchPool::default`].
	pub const DEFAULT_CAPACITY: usize = 256;

	/// Creates an empty pool retaining at most `capacity` integers.
	pub fn new(capacity: usize) -> Self {
		Self {
			free: Mutex::new(Vec::new()),
			capacity,
		}
	}

	/// Borrows `n` zeroed integers. They go back to the pool when the buffer is dropped.
	pub fn take(&self, n: usize) -> ScratchBuffer<'_> {
		let mut values = {
			let mut free = self.free.lock().unwrap_or_else(|e| e.into_inner());
			let start = free.len().saturating_sub(n);
			free.split_off(start)
		};
		for value in &mut values {
			value.set_zero();
		}
		values.resize(n, BigUint::ZERO);
		ScratchBuffer { pool: self, values }
	}

	/// Number of integers currently waiting in the free list.
	pub fn available(&self) -> usize {
		self.free.lock().unwrap_or_else(|e| e.into_inner()).len()
	}

	fn give_back(&self, values: Vec<BigUint>) {
		let mut free = self.free.lock().unwrap_or_else(|e| e.into_inner());
		let room = self.capacity.saturating_sub(free.len());
		free.extend(values.into_iter().take(room));
	}
}

impl Default for ScratchPool {
	fn default() -> Self {
		Self::new(Self::DEFAULT_CAPACITY)
	}
}

/// Integers borrowed from a [`ScratchPool`].
#[derive(Debug)]
pub struct ScratchBuffer<'a> {
	pool: &'a ScratchPool,
	values: Vec<BigUint>,
}

impl Deref for ScratchBuffer<'_> {
	type Target = [BigUint];

	fn deref(&self) -> &[BigUint] {
		&self.values
	}
}

impl DerefMut for ScratchBuffer<'_> {
	fn deref_mut(&mut self) -> &mut [BigUint] {
		&mut self.values
	}
}

impl Drop for ScratchBuffer<'_> {
	fn drop(&mut self) {
		self.pool.give_back(mem::take(&mut self.values));
	}
}

#[cfg(test)]
mod tests {
	use std::thread;

	use super::*;

	#[test]
	fn test_buffers_are_recycled_zeroed() {
		let pool = ScratchPool::new(8);
		{
			let mut buf = pool.take(3);
			assert_eq!(buf.len(), 3);
			buf[0] = BigUint::from(17u32);
			buf[2] = BigUint::from(u64::MAX) << 200;
		}
		assert_eq!(pool.available(), 3);

		let buf = pool.take(5);
		assert_eq!(pool.available(), 0);
		assert!(buf.iter().all(|v| v.is_zero()));
	}

	#[test]
	fn test_capacity_bounds_the_free_list() {
		let pool = ScratchPool::new(2);
		drop(pool.take(5));
		assert_eq!(pool.available(), 2);
	}

	#[test]
	fn test_released_on_error_path() {
		let pool = ScratchPool::new(4);
		let result: Result<(), &str> = (|| {
			let _buf = pool.take(4);
			Err("hint failed")
		})();
		assert!(result.is_err());
		assert_eq!(pool.available(), 4);
	}

	#[test]
	fn test_concurrent_use() {
		let pool = ScratchPool::new(64);
		thread::scope(|s| {
			for t in 0..8u32 {
				let pool = &pool;
				s.spawn(move || {
					for i in 0..100u32 {
						let mut buf = pool.take(4);
						assert!(buf.iter().all(|v| v.is_zero()));
						for v in buf.iter_mut() {
							*v = BigUint::from(t * 1000 + i);
						}
					}
				});
			}
		});
		assert!(pool.available() <= 64);
	}
}
