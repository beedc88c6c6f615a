//! VQsXi container parser (§4.5, §6.3).
//!
//! Same parsing shape as an iNES header: validate a fixed magic, read a
//! handful of fixed-width fields with an explicit length check before each
//! one, then slice a declared-length payload with its own underflow check.
//! Parsing never partially mutates target state: on any error the caller
//! gets back nothing constructible, and whatever `Vm` it intended to load
//! remains whatever it was before the call.

use crate::error::ContainerError;
use crate::opcode::VQSXI_MAGIC;

/// A parsed VQsXi image: its declared dimensions, color-depth flag, and the
/// bytecode payload it wraps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VqsxiImage {
    pub width: u64,
    pub height: u64,
    pub color_depth: bool,
    pub bytecode: Vec<u8>,
}

impl VqsxiImage {
    /// Parses a VQsXi byte buffer per the layout in §6.3:
    ///
    /// ```text
    /// 0  5  magic "VQsXi"
    /// 5  8  width (u64 LE)
    /// 13 8  height (u64 LE)
    /// 21 1  color-depth flag (u8)
    /// 22 8  bytecode length L (u64 LE)
    /// 30 L  bytecode
    /// ```
    pub fn parse(data: &[u8]) -> Result<Self, ContainerError> {
        if data.len() < VQSXI_MAGIC.len() || data[..VQSXI_MAGIC.len()] != VQSXI_MAGIC {
            let seen_len = data.len().min(VQSXI_MAGIC.len());
            return Err(ContainerError::InvalidMagic {
                magic: data[..seen_len].to_vec(),
            });
        }
        let mut offset = VQSXI_MAGIC.len();

        let width = read_u64_field(data, &mut offset, "width")?;
        let height = read_u64_field(data, &mut offset, "height")?;
        let color_depth = read_bool_field(data, &mut offset, "color_depth")?;
        let bytecode_len = read_u64_field(data, &mut offset, "bytecode_len")?;

        let remaining = data.len() - offset;
        if (remaining as u64) < bytecode_len {
            return Err(ContainerError::BytecodeUnderflow {
                expected: bytecode_len,
                actual: remaining as u64,
            });
        }

        let end = offset + bytecode_len as usize;
        let bytecode = data[offset..end].to_vec();

        log::debug!(
            "parsed VQsXi image: {width}x{height}, depth={color_depth}, {} bytecode bytes",
            bytecode.len()
        );

        Ok(VqsxiImage {
            width,
            height,
            color_depth,
            bytecode,
        })
    }
}

fn read_u64_field(
    data: &[u8],
    offset: &mut usize,
    field: &'static str,
) -> Result<u64, ContainerError> {
    let end = *offset + 8;
    let bytes = data
        .get(*offset..end)
        .ok_or(ContainerError::BadField { field })?;
    *offset = end;
    Ok(u64::from_le_bytes(bytes.try_into().unwrap()))
}

fn read_bool_field(
    data: &[u8],
    offset: &mut usize,
    field: &'static str,
) -> Result<bool, ContainerError> {
    let byte = *data.get(*offset).ok_or(ContainerError::BadField { field })?;
    *offset += 1;
    Ok(byte != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(width: u64, height: u64, depth: bool, bytecode: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(b"VQsXi");
        out.extend_from_slice(&width.to_le_bytes());
        out.extend_from_slice(&height.to_le_bytes());
        out.push(depth as u8);
        out.extend_from_slice(&(bytecode.len() as u64).to_le_bytes());
        out.extend_from_slice(bytecode);
        out
    }

    #[test]
    fn parses_spec_scenario_5() {
        let bytes = header(0x16, 0x16, false, &[0x00, 0x00]);
        let image = VqsxiImage::parse(&bytes).unwrap();
        assert_eq!(image.width, 22);
        assert_eq!(image.height, 22);
        assert!(!image.color_depth);
        assert_eq!(image.bytecode, vec![0x00, 0x00]);
    }

    #[test]
    fn rejects_bad_magic() {
        let bytes = b"VQsXj\x00\x00\x00\x00\x00\x00\x00\x00".to_vec();
        let err = VqsxiImage::parse(&bytes).unwrap_err();
        assert!(matches!(err, ContainerError::InvalidMagic { .. }));
    }

    #[test]
    fn rejects_too_short_for_magic() {
        let err = VqsxiImage::parse(b"VQ").unwrap_err();
        assert!(matches!(err, ContainerError::InvalidMagic { .. }));
    }

    #[test]
    fn rejects_truncated_header_field() {
        let mut bytes = b"VQsXi".to_vec();
        bytes.extend_from_slice(&[0x01, 0x02, 0x03]); // too short for width
        let err = VqsxiImage::parse(&bytes).unwrap_err();
        assert_eq!(err, ContainerError::BadField { field: "width" });
    }

    #[test]
    fn rejects_bytecode_underflow_per_spec_scenario_6() {
        let mut bytes = b"VQsXi".to_vec();
        bytes.extend_from_slice(&0u64.to_le_bytes());
        bytes.extend_from_slice(&0u64.to_le_bytes());
        bytes.push(0);
        bytes.extend_from_slice(&8u64.to_le_bytes());
        // no payload bytes follow
        let err = VqsxiImage::parse(&bytes).unwrap_err();
        assert_eq!(
            err,
            ContainerError::BytecodeUnderflow {
                expected: 8,
                actual: 0,
            }
        );
    }

    #[test]
    fn discards_trailing_bytes_beyond_declared_length() {
        let mut bytes = header(1, 1, true, &[0xAA, 0xBB]);
        bytes.extend_from_slice(&[0xFF, 0xFF, 0xFF]);
        let image = VqsxiImage::parse(&bytes).unwrap();
        assert_eq!(image.bytecode, vec![0xAA, 0xBB]);
    }
}
