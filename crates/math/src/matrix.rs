// Copyright 2025 Irreducible Inc.

use std::ops::{Index, IndexMut};

use getset::CopyGetters;
use gna_utils::ensure;

use super::error::Error;

/// Number of elements a row-major `rows x cols` operand with leading dimension `ld` spans.
pub const fn strided_len(rows: usize, cols: usize, ld: usize) -> usize {
	if rows == 0 || cols == 0 {
		0
	} else {
		(rows - 1) * ld + cols
	}
}

fn check_matrix_layout(len: usize, rows: usize, cols: usize, ld: usize) -> Result<(), Error> {
	ensure!(ld >= cols, Error::LeadingDimensionTooSmall { ld, cols });
	let expected = strided_len(rows, cols, ld);
	ensure!(
		len >= expected,
		Error::IncorrectArgumentLength {
			arg: "data".into(),
			expected,
			actual: len,
		}
	);
	Ok(())
}

fn check_vector_layout(len: usize, n: usize, inc: usize) -> Result<(), Error> {
	ensure!(inc != 0, Error::ZeroStride);
	let expected = strided_len(n, 1, inc);
	ensure!(
		len >= expected,
		Error::IncorrectArgumentLength {
			arg: "data".into(),
			expected,
			actual: len,
		}
	);
	Ok(())
}

/// Immutable view of a row-major matrix with an explicit leading dimension.
///
/// Row `i` starts at element `i * ld`. The view only covers the first `cols` elements of each
/// row; the remaining `ld - cols` elements may belong to another logical layer.
#[derive(Debug, Clone, Copy, CopyGetters)]
pub struct MatrixRef<'a> {
	data: &'a [f32],
	#[getset(get_copy = "pub")]
	rows: usize,
	#[getset(get_copy = "pub")]
	cols: usize,
	#[getset(get_copy = "pub")]
	ld: usize,
}

impl<'a> MatrixRef<'a> {
	/// Creates a view, checking that `data` spans the declared shape.
	///
	/// ## Throws
	///
	/// * [`Error::LeadingDimensionTooSmall`] if `ld < cols`
	/// * [`Error::IncorrectArgumentLength`] if `data` is shorter than the strided shape
	pub fn new(data: &'a [f32], rows: usize, cols: usize, ld: usize) -> Result<Self, Error> {
		check_matrix_layout(data.len(), rows, cols, ld)?;
		Ok(Self {
			data,
			rows,
			cols,
			ld,
		})
	}

	/// A densely packed view, `ld == cols`.
	pub fn dense(data: &'a [f32], rows: usize, cols: usize) -> Result<Self, Error> {
		Self::new(data, rows, cols, cols)
	}

	pub fn dim(&self) -> (usize, usize) {
		(self.rows, self.cols)
	}

	pub fn row(&self, i: usize) -> &'a [f32] {
		assert!(i < self.rows);
		let start = i * self.ld;
		&self.data[start..start + self.cols]
	}

	pub fn iter_rows(&self) -> impl Iterator<Item = &'a [f32]> + '_ {
		(0..self.rows).map(move |i| self.row(i))
	}

	/// Column `j` as a vector strided by the leading dimension.
	pub fn column(&self, j: usize) -> VectorRef<'a> {
		assert!(j < self.cols);
		if self.rows == 0 {
			return VectorRef::empty();
		}
		VectorRef {
			data: &self.data[j..],
			len: self.rows,
			inc: self.ld.max(1),
		}
	}
}

impl Index<(usize, usize)> for MatrixRef<'_> {
	type Output = f32;

	fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
		assert!(i < self.rows);
		assert!(j < self.cols);
		&self.data[i * self.ld + j]
	}
}

/// Mutable view of a row-major matrix with an explicit leading dimension.
#[derive(Debug, CopyGetters)]
pub struct MatrixMut<'a> {
	data: &'a mut [f32],
	#[getset(get_copy = "pub")]
	rows: usize,
	#[getset(get_copy = "pub")]
	cols: usize,
	#[getset(get_copy = "pub")]
	ld: usize,
}

impl<'a> MatrixMut<'a> {
	/// Creates a mutable view, checking that `data` spans the declared shape.
	///
	/// ## Throws
	///
	/// * [`Error::LeadingDimensionTooSmall`] if `ld < cols`
	/// * [`Error::IncorrectArgumentLength`] if `data` is shorter than the strided shape
	pub fn new(data: &'a mut [f32], rows: usize, cols: usize, ld: usize) -> Result<Self, Error> {
		check_matrix_layout(data.len(), rows, cols, ld)?;
		Ok(Self {
			data,
			rows,
			cols,
			ld,
		})
	}

	pub fn dense(data: &'a mut [f32], rows: usize, cols: usize) -> Result<Self, Error> {
		Self::new(data, rows, cols, cols)
	}

	pub fn dim(&self) -> (usize, usize) {
		(self.rows, self.cols)
	}

	/// Borrows the view as immutable.
	pub fn as_const(&self) -> MatrixRef<'_> {
		MatrixRef {
			data: &*self.data,
			rows: self.rows,
			cols: self.cols,
			ld: self.ld,
		}
	}

	/// Reborrows the view for a shorter lifetime.
	pub fn reborrow(&mut self) -> MatrixMut<'_> {
		MatrixMut {
			data: &mut *self.data,
			rows: self.rows,
			cols: self.cols,
			ld: self.ld,
		}
	}

	pub fn row(&self, i: usize) -> &[f32] {
		assert!(i < self.rows);
		let start = i * self.ld;
		&self.data[start..start + self.cols]
	}

	pub fn row_mut(&mut self, i: usize) -> &mut [f32] {
		assert!(i < self.rows);
		let start = i * self.ld;
		&mut self.data[start..start + self.cols]
	}

	/// Column `j` as a mutable vector strided by the leading dimension.
	pub fn column_mut(&mut self, j: usize) -> VectorMut<'_> {
		assert!(j < self.cols);
		if self.rows == 0 {
			return VectorMut::empty();
		}
		VectorMut {
			data: &mut self.data[j..],
			len: self.rows,
			inc: self.ld.max(1),
		}
	}

	/// Sets every element of row `i` to `values[i]`.
	///
	/// This is the bias broadcast that precedes an accumulating primitive.
	pub fn fill_rows(&mut self, values: &[f32]) {
		assert!(values.len() >= self.rows);
		for i in 0..self.rows {
			self.row_mut(i).fill(values[i]);
		}
	}
}

impl Index<(usize, usize)> for MatrixMut<'_> {
	type Output = f32;

	fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
		assert!(i < self.rows);
		assert!(j < self.cols);
		&self.data[i * self.ld + j]
	}
}

impl IndexMut<(usize, usize)> for MatrixMut<'_> {
	fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Self::Output {
		assert!(i < self.rows);
		assert!(j < self.cols);
		&mut self.data[i * self.ld + j]
	}
}

/// Immutable strided vector view; element `i` lives at `data[i * inc]`.
#[derive(Debug, Clone, Copy, CopyGetters)]
pub struct VectorRef<'a> {
	data: &'a [f32],
	#[getset(get_copy = "pub")]
	len: usize,
	#[getset(get_copy = "pub")]
	inc: usize,
}

impl<'a> VectorRef<'a> {
	pub fn new(data: &'a [f32], len: usize, inc: usize) -> Result<Self, Error> {
		check_vector_layout(data.len(), len, inc)?;
		Ok(Self { data, len, inc })
	}

	pub fn contiguous(data: &'a [f32]) -> Self {
		Self {
			data,
			len: data.len(),
			inc: 1,
		}
	}

	fn empty() -> Self {
		Self {
			data: &[],
			len: 0,
			inc: 1,
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	pub fn get(&self, i: usize) -> f32 {
		assert!(i < self.len);
		self.data[i * self.inc]
	}

	pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
		(0..self.len).map(move |i| self.data[i * self.inc])
	}
}

/// Mutable strided vector view; element `i` lives at `data[i * inc]`.
#[derive(Debug, CopyGetters)]
pub struct VectorMut<'a> {
	data: &'a mut [f32],
	#[getset(get_copy = "pub")]
	len: usize,
	#[getset(get_copy = "pub")]
	inc: usize,
}

impl<'a> VectorMut<'a> {
	pub fn new(data: &'a mut [f32], len: usize, inc: usize) -> Result<Self, Error> {
		check_vector_layout(data.len(), len, inc)?;
		Ok(Self { data, len, inc })
	}

	pub fn contiguous(data: &'a mut [f32]) -> Self {
		let len = data.len();
		Self { data, len, inc: 1 }
	}

	fn empty() -> Self {
		Self {
			data: &mut [],
			len: 0,
			inc: 1,
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	pub fn get(&self, i: usize) -> f32 {
		assert!(i < self.len);
		self.data[i * self.inc]
	}

	pub fn get_mut(&mut self, i: usize) -> &mut f32 {
		assert!(i < self.len);
		&mut self.data[i * self.inc]
	}
}
