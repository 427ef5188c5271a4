use ndarray::Array4;
use crate::error::ClassifyError;

pub const TENSOR_CHANNELS: usize = 3;
const F32_BYTES: usize = std::mem::size_of::<f32>();

/// Model input laid out as `[1, height, width, 3]` `f32` values, stored as
/// raw bytes in the platform's native byte order.
#[derive(Debug, Clone, PartialEq)]
pub struct TensorBuffer {
    width: usize,
    height: usize,
    bytes: Vec<u8>,
}

impl TensorBuffer {
    /// Number of bytes a `width` x `height` RGB tensor occupies.
    pub fn capacity_for(width: usize, height: usize) -> usize {
        F32_BYTES * width * height * TENSOR_CHANNELS
    }

    pub(crate) fn with_capacity(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            bytes: Vec::with_capacity(Self::capacity_for(width, height)),
        }
    }

    pub(crate) fn put_f32(&mut self, value: f32) {
        self.bytes.extend_from_slice(&value.to_ne_bytes());
    }

    /// Wraps bytes produced elsewhere, checking them against the declared shape.
    pub fn from_ne_bytes(width: usize, height: usize, bytes: Vec<u8>) -> Result<Self, ClassifyError> {
        let expected = Self::capacity_for(width, height);
        if bytes.len() != expected {
            return Err(ClassifyError::TensorSizeMismatch { expected, actual: bytes.len() });
        }
        Ok(Self { width, height, bytes })
    }

    pub fn shape(&self) -> [usize; 4] {
        [1, self.height, self.width, TENSOR_CHANNELS]
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn get(&self, index: usize) -> Option<f32> {
        let start = index.checked_mul(F32_BYTES)?;
        let end = start.checked_add(F32_BYTES)?;
        let raw = self.bytes.get(start..end)?;
        Some(f32::from_ne_bytes([raw[0], raw[1], raw[2], raw[3]]))
    }

    pub fn to_f32s(&self) -> Vec<f32> {
        self.bytes
            .chunks_exact(F32_BYTES)
            .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
            .collect()
    }

    /// Consumes the buffer into an NHWC array for the inference runtime.
    pub fn into_array(self) -> Result<Array4<f32>, ClassifyError> {
        let expected = Self::capacity_for(self.width, self.height);
        if self.bytes.len() != expected {
            return Err(ClassifyError::TensorSizeMismatch { expected, actual: self.bytes.len() });
        }
        let shape = (1, self.height, self.width, TENSOR_CHANNELS);
        Array4::from_shape_vec(shape, self.to_f32s())
            .map_err(|_| ClassifyError::TensorSizeMismatch { expected, actual: self.bytes.len() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_byte_order() {
        let mut t = TensorBuffer::with_capacity(1, 1);
        t.put_f32(0.25);
        t.put_f32(0.5);
        t.put_f32(1.0);

        assert_eq!(t.len(), TensorBuffer::capacity_for(1, 1));
        assert_eq!(&t.as_bytes()[0..4], &0.25f32.to_ne_bytes());
        assert_eq!(t.get(2), Some(1.0));
        assert_eq!(t.get(3), None);
    }

    #[test]
    fn huge_index_is_none() {
        let t = TensorBuffer::from_ne_bytes(1, 1, vec![0; 12]).unwrap();
        assert_eq!(t.get(usize::MAX / 4), None);
        assert_eq!(t.get(usize::MAX / 4 + 1), None);
        assert_eq!(t.get(usize::MAX), None);
        assert_eq!(t.get(2), Some(0.0));
    }

    #[test]
    fn array_shape_is_nhwc() {
        let values: Vec<f32> = (0..12).map(|x| x as f32).collect();
        let bytes = values.iter().flat_map(|v| v.to_ne_bytes()).collect();
        let t = TensorBuffer::from_ne_bytes(2, 2, bytes).unwrap();
        assert_eq!(t.shape(), [1, 2, 2, 3]);

        let arr = t.into_array().unwrap();
        assert_eq!(arr.shape(), &[1, 2, 2, 3]);
        assert_eq!(arr[[0, 0, 1, 0]], 3.0);
        assert_eq!(arr[[0, 1, 0, 2]], 8.0);
    }

    #[test]
    fn wrong_length_rejected() {
        let err = TensorBuffer::from_ne_bytes(2, 2, vec![0; 10]).unwrap_err();
        assert_eq!(err, ClassifyError::TensorSizeMismatch { expected: 48, actual: 10 });
    }
}
