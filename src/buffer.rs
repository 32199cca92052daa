// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::error::{ArgumentError, Error};

/// A growable byte buffer whose ranges can be replaced in place.
///
/// Every allocation is fallible, so running out of memory is reported as
/// `Error::Allocation` instead of aborting.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SpliceBuffer {
    bytes: Vec<u8>,
}

impl SpliceBuffer {
    /// Creates a buffer holding a copy of `bytes`.
    pub fn seeded(bytes: &[u8]) -> Result<SpliceBuffer, Error> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(bytes.len())?;
        buf.extend_from_slice(bytes);
        Ok(SpliceBuffer { bytes: buf })
    }

    /// Appends `bytes` to the end of the buffer.
    pub fn append(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.bytes.try_reserve(bytes.len())?;
        self.bytes.extend_from_slice(bytes);
        Ok(())
    }

    /// Replaces the bytes in `start..end` with `with`.
    ///
    /// The buffer is left untouched if the range is out of bounds or if the
    /// buffer could not grow.
    pub fn splice(
        &mut self,
        start: usize,
        end: usize,
        with: &[u8],
    ) -> Result<(), Error> {
        let len = self.bytes.len();
        if start > end || end > len {
            return Err(ArgumentError::SpliceOutOfBounds { start, end, len }
                .into());
        }
        if with.len() > end - start {
            self.bytes.try_reserve(with.len() - (end - start))?;
        }
        self.bytes.splice(start..end, with.iter().copied());
        Ok(())
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::SpliceBuffer;
    use crate::error::{ArgumentError, Error};

    #[test]
    fn splice_grow_and_shrink() {
        let mut buf = SpliceBuffer::seeded(b"hello world").unwrap();
        buf.splice(0, 5, b"goodbye").unwrap();
        assert_eq!(buf.as_bytes(), b"goodbye world");
        buf.splice(7, 13, b"").unwrap();
        assert_eq!(buf.as_bytes(), b"goodbye");
        buf.splice(7, 7, b"!").unwrap();
        buf.append(b"?").unwrap();
        assert_eq!(buf.into_vec(), b"goodbye!?");
    }

    #[test]
    fn splice_out_of_bounds() {
        let mut buf = SpliceBuffer::seeded(b"abc").unwrap();
        assert_eq!(
            buf.splice(2, 4, b"x"),
            Err(Error::InvalidArgument(ArgumentError::SpliceOutOfBounds {
                start: 2,
                end: 4,
                len: 3,
            })),
        );
        assert!(buf.splice(2, 1, b"x").is_err());
        assert_eq!(buf.as_bytes(), b"abc");
        assert_eq!(buf.len(), 3);
    }
}
