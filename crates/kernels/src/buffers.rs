// Copyright 2025 Irreducible Inc.

use crate::error::Error;

/// The externally owned input and output regions of one component invocation.
///
/// The output is borrowed uniquely, so a kernel can never observe its own writes through the
/// input. Layers that share one physical region are expressed by the scheduler handing out
/// disjoint sub-slices.
#[derive(Debug)]
pub struct ComponentBuffers<'a> {
	pub inputs: &'a [f32],
	pub outputs: &'a mut [f32],
}

impl<'a> ComponentBuffers<'a> {
	pub fn new(inputs: &'a [f32], outputs: &'a mut [f32]) -> Self {
		Self { inputs, outputs }
	}

	/// Views raw byte regions as single-precision float buffers.
	///
	/// ## Throws
	///
	/// * [`Error::UnalignedBuffer`] if either region is not 4-byte aligned or its length is not
	///   a multiple of 4
	pub fn from_bytes(inputs: &'a [u8], outputs: &'a mut [u8]) -> Result<Self, Error> {
		let inputs = bytemuck::try_cast_slice(inputs).map_err(Error::UnalignedBuffer)?;
		let outputs = bytemuck::try_cast_slice_mut(outputs).map_err(Error::UnalignedBuffer)?;
		Ok(Self { inputs, outputs })
	}

	/// Reborrows the buffers for a shorter lifetime, so they can be reused across calls.
	pub fn reborrow(&mut self) -> ComponentBuffers<'_> {
		ComponentBuffers {
			inputs: self.inputs,
			outputs: &mut *self.outputs,
		}
	}
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;

	use super::*;

	#[test]
	fn test_from_aligned_bytes() {
		let inputs = [1.0f32, 2.0];
		let mut outputs = [0.0f32; 3];
		let buffers = ComponentBuffers::from_bytes(
			bytemuck::cast_slice(&inputs),
			bytemuck::cast_slice_mut(&mut outputs),
		)
		.unwrap();
		assert_eq!(buffers.inputs, &[1.0, 2.0]);
		assert_eq!(buffers.outputs.len(), 3);
	}

	#[test]
	fn test_ragged_bytes_are_rejected() {
		let inputs = [0.0f32; 2];
		let mut outputs = [0.0f32; 2];
		let input_bytes: &[u8] = bytemuck::cast_slice(&inputs);
		assert_matches!(
			ComponentBuffers::from_bytes(&input_bytes[..7], bytemuck::cast_slice_mut(&mut outputs)),
			Err(Error::UnalignedBuffer(_))
		);
	}
}
